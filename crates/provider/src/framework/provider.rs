//! Provider lifecycle hooks
//!
//! A provider moves through a fixed lifecycle driven by the host: metadata
//! and schema are queried, [`Provider::configure`] runs once and produces
//! the provider data shared with every resource, resources are then built
//! and opened per operation, and [`Provider::close`] tears the provider
//! down at the end of the run.

use super::diagnostics::Diagnostics;
use super::ephemeral::EphemeralResource;
use super::schema::Schema;
use async_trait::async_trait;
use std::any::Any;
use std::sync::Arc;

/// Opaque handle a provider shares with its resources.
///
/// Each resource downcasts this to the concrete type it expects and reports
/// a configuration error if the shape is not what it was built for.
pub type ProviderData = Arc<dyn Any + Send + Sync>;

/// Constructor for one ephemeral resource variant.
pub type EphemeralResourceFactory = fn() -> Box<dyn EphemeralResource>;

/// Identity of a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderMetadata {
    /// Type name resources are namespaced under (e.g. `gopass`)
    pub type_name: String,

    /// Provider version string
    pub version: String,
}

/// Request for [`Provider::configure`].
#[derive(Debug, Clone, Default)]
pub struct ConfigureProviderRequest {
    /// Provider configuration as supplied by the practitioner
    pub config: serde_json::Value,
}

impl ConfigureProviderRequest {
    /// Build a request around a configuration value.
    #[must_use]
    pub fn new(config: serde_json::Value) -> Self {
        Self { config }
    }
}

/// Response from [`Provider::configure`].
#[derive(Default)]
pub struct ConfigureProviderResponse {
    /// Data to share with every resource of this provider, if configuration
    /// succeeded
    pub provider_data: Option<ProviderData>,

    /// Problems encountered while configuring
    pub diagnostics: Diagnostics,
}

/// The host-facing surface of a provider.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Identity of this provider.
    fn metadata(&self) -> ProviderMetadata;

    /// Schema of the provider-level configuration block.
    fn schema(&self) -> Schema;

    /// Build whatever the resources of this provider share, exactly once
    /// per provider instance.
    async fn configure(&self, request: ConfigureProviderRequest) -> ConfigureProviderResponse;

    /// Factories for the ephemeral resource variants this provider offers.
    fn ephemeral_resources(&self) -> Vec<EphemeralResourceFactory>;

    /// Type names of conventional, state-backed resources.
    ///
    /// Ephemeral-only providers have none, which is the default.
    fn resource_type_names(&self) -> Vec<String> {
        Vec::new()
    }

    /// Type names of data sources. Defaults to none.
    fn data_source_type_names(&self) -> Vec<String> {
        Vec::new()
    }

    /// Tear the provider down at the end of the run.
    ///
    /// Called once; must tolerate being called without a prior successful
    /// [`configure`](Self::configure).
    async fn close(&self);
}
