//! Secret-group ephemeral resource

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

/// Configuration block of a `gopass_env` resource.
#[derive(Debug, Deserialize)]
struct EnvConfig {
    path: String,
}

/// Ephemeral resource `gopass_env`: every immediate child of a store
/// folder, as one map.
///
/// Opening lists the children of `path` and resolves each child's primary
/// value, keyed by the child name relative to the prefix. A child that
/// fails to resolve is skipped rather than failing the whole group; the
/// skip is logged by the store client. The map is sensitive and exists only
/// for the duration of the operation.
#[derive(Default)]
pub struct EnvEphemeral {
    client: Option<Arc<StoreClient>>,
}

impl EnvEphemeral {
    /// Create an unconfigured instance. The host supplies the store client
    /// through [`EphemeralResource::configure`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EphemeralResource for EnvEphemeral {
    fn metadata(&self, request: MetadataRequest) -> MetadataResponse {
        MetadataResponse {
            type_name: format!("{}_env", request.provider_type_name),
        }
    }

    fn schema(&self) -> Schema {
        Schema::new(
            "Retrieves all secrets directly under a gopass folder as a map, \
             keyed by secret name.",
        )
        .attribute(
            "path",
            Attribute::string("Store folder to read secrets from.").required(),
        )
        .attribute(
            "values",
            Attribute::string_map(
                "Primary values of the folder's secrets, keyed by secret name.",
            )
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
                "gopass_env was opened before its provider was configured.",
            );
        };

        let config: EnvConfig = match serde_json::from_value(request.config) {
            Ok(config) => config,
            Err(error) => {
                return OpenResponse::attribute_error(
                    "path",
                    "Invalid resource configuration",
                    format!("The gopass_env configuration could not be read: {error}"),
                );
            }
        };

        debug!(path = %config.path, "opening gopass_env");
        match client.get_child_values(&config.path).await {
            Ok(children) => {
                if !children.is_complete() {
                    debug!(
                        path = %config.path,
                        skipped = children.failures().len(),
                        "some child secrets were skipped"
                    );
                }
                let values: serde_json::Map<String, Value> = children
                    .values()
                    .iter()
                    .map(|(name, value)| (name.clone(), Value::String(value.expose().to_string())))
                    .collect();
                OpenResponse::success(json!({
                    "path": config.path,
                    "values": Value::Object(values),
                }))
            }
            Err(error) => OpenResponse::error(
                "Failed to read secrets",
                format!("Could not resolve secrets under '{}': {error}", config.path),
            ),
        }
    }
}
