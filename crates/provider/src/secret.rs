//! Single-secret ephemeral resource

use crate::framework::{
    Attribute, ConfigureRequest, ConfigureResponse, EphemeralResource, MetadataRequest,
    MetadataResponse, OpenRequest, OpenResponse, Schema,
};
use async_trait::async_trait;
use passbridge_secrets::StoreClient;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;

/// Configuration block of a `gopass_secret` resource.
#[derive(Debug, Deserialize)]
struct SecretConfig {
    path: String,
}

/// Ephemeral resource `gopass_secret`: one secret looked up by path.
///
/// Opening resolves the primary value and the named fields of the entry at
/// `path`, at the latest revision. Both outputs are sensitive and exist
/// only for the duration of the operation.
#[derive(Default)]
pub struct SecretEphemeral {
    client: Option<Arc<StoreClient>>,
}

impl SecretEphemeral {
    /// Create an unconfigured instance. The host supplies the store client
    /// through [`EphemeralResource::configure`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EphemeralResource for SecretEphemeral {
    fn metadata(&self, request: MetadataRequest) -> MetadataResponse {
        MetadataResponse {
            type_name: format!("{}_secret", request.provider_type_name),
        }
    }

    fn schema(&self) -> Schema {
        Schema::new("Retrieves a single secret from the gopass store for ephemeral use.")
            .attribute(
                "path",
                Attribute::string("Path of the secret in the store.").required(),
            )
            .attribute(
                "value",
                Attribute::string("Primary value of the secret (first line of the entry).")
                    .computed()
                    .sensitive(),
            )
            .attribute(
                "fields",
                Attribute::string_map("Named `key: value` fields from the entry body.")
                    .computed()
                    .sensitive(),
            )
    }

    fn configure(&mut self, request: ConfigureRequest) -> ConfigureResponse {
        let mut response = ConfigureResponse::default();
        let Some(data) = request.provider_data else {
            return response;
        };
        match data.downcast::<StoreClient>() {
            Ok(client) => self.client = Some(client),
            Err(_) => response.diagnostics.add_error(
                "Unexpected provider data",
                "Expected a gopass store client. \
                 This is a bug in the provider; please report it.",
            ),
        }
        response
    }

    async fn open(&self, request: OpenRequest) -> OpenResponse {
        let Some(client) = &self.client else {
            return OpenResponse::error(
                "Resource not configured",
                "gopass_secret was opened before its provider was configured.",
            );
        };

        let config: SecretConfig = match serde_json::from_value(request.config) {
            Ok(config) => config,
            Err(error) => {
                return OpenResponse::attribute_error(
                    "path",
                    "Invalid resource configuration",
                    format!("The gopass_secret configuration could not be read: {error}"),
                );
            }
        };

        debug!(path = %config.path, "opening gopass_secret");
        match client.get_secret_full(&config.path).await {
            Ok(secret) => {
                let fields: serde_json::Map<String, Value> = secret
                    .fields()
                    .iter()
                    .map(|(name, value)| (name.clone(), Value::String(value.expose().to_string())))
                    .collect();
                OpenResponse::success(json!({
                    "path": config.path,
                    "value": secret.password().expose(),
                    "fields": Value::Object(fields),
                }))
            }
            Err(error) => OpenResponse::error(
                "Failed to read secret",
                format!("Could not read secret at path '{}': {error}", config.path),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::ProviderData;
    use passbridge_secrets::MemoryBackend;
    use serde_json::json;

    fn configured_resource(backend: MemoryBackend) -> SecretEphemeral {
        let client = Arc::new(StoreClient::new(Arc::new(backend)));
        let mut resource = SecretEphemeral::new();
        let response = resource.configure(ConfigureRequest {
            provider_data: Some(client as ProviderData),
        });
        assert!(!response.diagnostics.has_errors());
        resource
    }

    #[test]
    fn type_name_derives_from_provider() {
        let resource = SecretEphemeral::new();
        let metadata = resource.metadata(MetadataRequest {
            provider_type_name: "gopass".to_string(),
        });
        assert_eq!(metadata.type_name, "gopass_secret");
    }

    #[test]
    fn schema_marks_outputs_sensitive() {
        let schema = SecretEphemeral::new().schema();
        assert!(schema.attr("path").unwrap().required);
        let value = schema.attr("value").unwrap();
        assert!(value.computed && value.sensitive);
        let fields = schema.attr("fields").unwrap();
        assert!(fields.computed && fields.sensitive);
    }

    #[test]
    fn wrong_provider_data_is_reported() {
        let mut resource = SecretEphemeral::new();
        let response = resource.configure(ConfigureRequest {
            provider_data: Some(Arc::new("not a client".to_string()) as ProviderData),
        });
        assert!(response.diagnostics.has_errors());
        let detail = &response.diagnostics.iter().next().unwrap().detail;
        assert!(detail.contains("store client"));
    }

    #[test]
    fn missing_provider_data_defers_to_open() {
        let mut resource = SecretEphemeral::new();
        let response = resource.configure(ConfigureRequest {
            provider_data: None,
        });
        assert!(!response.diagnostics.has_errors());
    }

    #[tokio::test]
    async fn open_before_configure_is_an_error() {
        let resource = SecretEphemeral::new();
        let response = resource
            .open(OpenRequest::new(json!({"path": "a/b"})))
            .await;
        assert!(response.result.is_none());
        assert!(response.diagnostics.has_errors());
    }

    #[tokio::test]
    async fn open_resolves_value_and_fields() {
        let backend = MemoryBackend::new()
            .with_secret("infra/db/password", "secret1\nuser: alice\nport: 5432\n");
        let resource = configured_resource(backend);

        let response = resource
            .open(OpenRequest::new(json!({"path": "infra/db/password"})))
            .await;
        assert!(!response.diagnostics.has_errors());
        let result = response.result.unwrap();
        assert_eq!(result["path"], "infra/db/password");
        assert_eq!(result["value"], "secret1");
        assert_eq!(result["fields"]["user"], "alice");
        assert_eq!(result["fields"]["port"], "5432");
    }

    #[tokio::test]
    async fn missing_secret_yields_error_with_path() {
        let resource = configured_resource(MemoryBackend::new());
        let response = resource
            .open(OpenRequest::new(json!({"path": "absent/entry"})))
            .await;
        assert!(response.result.is_none());
        let detail = &response.diagnostics.iter().next().unwrap().detail;
        assert!(detail.contains("absent/entry"));
        assert!(detail.contains("not found"));
    }

    #[tokio::test]
    async fn config_without_path_is_an_attribute_error() {
        let resource = configured_resource(MemoryBackend::new());
        let response = resource.open(OpenRequest::new(json!({}))).await;
        assert!(response.diagnostics.has_errors());
        let entry = response.diagnostics.iter().next().unwrap();
        assert_eq!(
            entry.attribute_path.as_deref(),
            Some(&["path".to_string()][..])
        );
    }
}
