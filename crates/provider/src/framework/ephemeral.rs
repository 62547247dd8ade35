//! Ephemeral resource hooks
//!
//! An ephemeral resource produces values that exist for the duration of one
//! operation and are never written to plan or state. The host builds a
//! fresh instance from its factory, passes the provider data through
//! [`EphemeralResource::configure`], and calls
//! [`EphemeralResource::open`] to produce the result.

use super::diagnostics::Diagnostics;
use super::provider::ProviderData;
use super::schema::Schema;
use async_trait::async_trait;

/// Request for [`EphemeralResource::metadata`].
#[derive(Debug, Clone)]
pub struct MetadataRequest {
    /// Type name of the owning provider, used to namespace the resource
    pub provider_type_name: String,
}

/// Response from [`EphemeralResource::metadata`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataResponse {
    /// Full type name of the resource (e.g. `gopass_secret`)
    pub type_name: String,
}

/// Request for [`EphemeralResource::configure`].
#[derive(Default)]
pub struct ConfigureRequest {
    /// Data the provider shared during its own configure step
    pub provider_data: Option<ProviderData>,
}

/// Response from [`EphemeralResource::configure`].
#[derive(Default)]
pub struct ConfigureResponse {
    /// Problems encountered while wiring the resource to its provider
    pub diagnostics: Diagnostics,
}

/// Request for [`EphemeralResource::open`].
#[derive(Debug, Clone, Default)]
pub struct OpenRequest {
    /// Resource configuration as supplied by the practitioner
    pub config: serde_json::Value,
}

impl OpenRequest {
    /// Build a request around a configuration value.
    #[must_use]
    pub fn new(config: serde_json::Value) -> Self {
        Self { config }
    }
}

/// Response from [`EphemeralResource::open`].
///
/// `result` lives for the one operation that requested it. The host must
/// treat it as transient: it is never serialized into plan or state, and
/// the schema marks every value attribute as sensitive.
#[derive(Debug, Default)]
pub struct OpenResponse {
    /// The resolved attributes, when the open succeeded
    pub result: Option<serde_json::Value>,

    /// Problems encountered while opening
    pub diagnostics: Diagnostics,
}

impl OpenResponse {
    /// Successful response carrying resolved attributes.
    #[must_use]
    pub fn success(result: serde_json::Value) -> Self {
        Self {
            result: Some(result),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Failed response carrying one error diagnostic.
    #[must_use]
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        let mut diagnostics = Diagnostics::new();
        diagnostics.add_error(summary, detail);
        Self {
            result: None,
            diagnostics,
        }
    }

    /// Failed response with an error diagnostic tied to an attribute.
    #[must_use]
    pub fn attribute_error(
        attribute: impl Into<String>,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        let mut diagnostics = Diagnostics::new();
        diagnostics.add_attribute_error(attribute, summary, detail);
        Self {
            result: None,
            diagnostics,
        }
    }
}

/// One ephemeral resource variant.
///
/// Implementations are built per operation from their factory; `configure`
/// wires in the provider data and `open` resolves the result.
#[async_trait]
pub trait EphemeralResource: Send + Sync {
    /// Resource type name, derived from the provider type name.
    fn metadata(&self, request: MetadataRequest) -> MetadataResponse;

    /// Schema of the resource configuration and result attributes.
    fn schema(&self) -> Schema;

    /// Wire the resource to its provider's shared data.
    fn configure(&mut self, request: ConfigureRequest) -> ConfigureResponse;

    /// Resolve the ephemeral result for one operation.
    async fn open(&self, request: OpenRequest) -> OpenResponse;
}
