//! The gopass provider

use crate::env::EnvEphemeral;
use crate::framework::{
    Attribute, ConfigureProviderRequest, ConfigureProviderResponse, EphemeralResourceFactory,
    Provider, ProviderData, ProviderMetadata, Schema,
};
use crate::secret::SecretEphemeral;
use async_trait::async_trait;
use passbridge_gopass::GopassBackend;
use passbridge_secrets::{StoreBackend, StoreClient};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Provider-level configuration block.
#[derive(Debug, Clone, Default, Deserialize)]
struct GopassProviderModel {
    /// Path to the gopass executable; `gopass` on `PATH` when unset
    #[serde(default)]
    binary: Option<String>,
}

/// Provider exposing a gopass store as ephemeral resources.
///
/// [`configure`](Provider::configure) builds exactly one [`StoreClient`]
/// and shares it with every resource instance; the store behind it is
/// opened lazily on the first secret read and released once in
/// [`close`](Provider::close). The provider declares no conventional
/// resources or data sources: retrieved secrets must never become durable
/// state, so its only capability is ephemeral values.
pub struct GopassProvider {
    version: String,
    backend: Option<Arc<dyn StoreBackend>>,
    client: Mutex<Option<Arc<StoreClient>>>,
}

impl GopassProvider {
    /// Create a provider that shells out to the gopass CLI.
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            backend: None,
            client: Mutex::new(None),
        }
    }

    /// Create a provider over a specific store backend.
    ///
    /// Embedders and tests use this to swap the gopass CLI for another
    /// [`StoreBackend`]; the `binary` configuration attribute is ignored in
    /// that case.
    #[must_use]
    pub fn with_backend(version: impl Into<String>, backend: Arc<dyn StoreBackend>) -> Self {
        Self {
            version: version.into(),
            backend: Some(backend),
            client: Mutex::new(None),
        }
    }
}

#[async_trait]
impl Provider for GopassProvider {
    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            type_name: "gopass".to_string(),
            version: self.version.clone(),
        }
    }

    fn schema(&self) -> Schema {
        Schema::new(
            "Read secrets from a local gopass password store as ephemeral values. \
             Values are resolved at use and never written to plan or state.",
        )
        .attribute(
            "binary",
            Attribute::string("Path to the gopass executable. Defaults to `gopass` on PATH."),
        )
    }

    async fn configure(&self, request: ConfigureProviderRequest) -> ConfigureProviderResponse {
        let mut response = ConfigureProviderResponse::default();

        let model = if request.config.is_null() {
            GopassProviderModel::default()
        } else {
            match serde_json::from_value::<GopassProviderModel>(request.config) {
                Ok(model) => model,
                Err(error) => {
                    response.diagnostics.add_error(
                        "Invalid provider configuration",
                        format!("The gopass provider configuration could not be read: {error}"),
                    );
                    return response;
                }
            }
        };

        let backend: Arc<dyn StoreBackend> = match (&self.backend, model.binary) {
            (Some(backend), _) => Arc::clone(backend),
            (None, Some(binary)) => Arc::new(GopassBackend::with_binary(binary)),
            (None, None) => Arc::new(GopassBackend::new()),
        };

        let client = Arc::new(StoreClient::new(backend));
        *self.client.lock().await = Some(Arc::clone(&client));
        debug!(version = %self.version, "gopass provider configured");

        response.provider_data = Some(client as ProviderData);
        response
    }

    fn ephemeral_resources(&self) -> Vec<EphemeralResourceFactory> {
        vec![
            || Box::new(SecretEphemeral::new()),
            || Box::new(EnvEphemeral::new()),
        ]
    }

    async fn close(&self) {
        let client = self.client.lock().await.take();
        if let Some(client) = client {
            debug!("closing gopass provider");
            client.close().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::MetadataRequest;
    use passbridge_secrets::MemoryBackend;
    use serde_json::json;

    fn memory_provider() -> GopassProvider {
        GopassProvider::with_backend("test", Arc::new(MemoryBackend::new()))
    }

    #[test]
    fn metadata_reports_type_name_and_version() {
        let provider = GopassProvider::new("1.2.3");
        let metadata = provider.metadata();
        assert_eq!(metadata.type_name, "gopass");
        assert_eq!(metadata.version, "1.2.3");
    }

    #[test]
    fn schema_offers_optional_binary_attribute() {
        let schema = GopassProvider::new("test").schema();
        let binary = schema.attr("binary").unwrap();
        assert!(!binary.required);
        assert!(!binary.sensitive);
    }

    #[test]
    fn declares_no_conventional_resources() {
        let provider = GopassProvider::new("test");
        assert!(provider.resource_type_names().is_empty());
        assert!(provider.data_source_type_names().is_empty());
        assert_eq!(provider.ephemeral_resources().len(), 2);
    }

    #[test]
    fn resource_factories_cover_both_variants() {
        let provider = GopassProvider::new("test");
        let names: Vec<String> = provider
            .ephemeral_resources()
            .into_iter()
            .map(|factory| {
                factory()
                    .metadata(MetadataRequest {
                        provider_type_name: "gopass".to_string(),
                    })
                    .type_name
            })
            .collect();
        assert_eq!(names, vec!["gopass_secret", "gopass_env"]);
    }

    #[tokio::test]
    async fn configure_shares_a_store_client() {
        let provider = memory_provider();
        let response = provider
            .configure(ConfigureProviderRequest::new(serde_json::Value::Null))
            .await;
        assert!(!response.diagnostics.has_errors());
        let data = response.provider_data.unwrap();
        assert!(data.downcast::<StoreClient>().is_ok());
    }

    #[tokio::test]
    async fn configure_accepts_binary_override() {
        let provider = GopassProvider::new("test");
        let response = provider
            .configure(ConfigureProviderRequest::new(
                json!({"binary": "/usr/local/bin/gopass"}),
            ))
            .await;
        assert!(!response.diagnostics.has_errors());
        assert!(response.provider_data.is_some());
    }

    #[tokio::test]
    async fn configure_rejects_malformed_config() {
        let provider = memory_provider();
        let response = provider
            .configure(ConfigureProviderRequest::new(json!({"binary": 42})))
            .await;
        assert!(response.diagnostics.has_errors());
        assert!(response.provider_data.is_none());
    }

    #[tokio::test]
    async fn close_without_configure_is_a_no_op() {
        let provider = memory_provider();
        provider.close().await;
        provider.close().await;
    }
}
