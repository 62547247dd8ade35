//! Host boundary for provisioning tools
//!
//! The provisioning host drives providers through a small set of explicit
//! hooks: identity and schema queries, a provider-wide configure step, and
//! per-operation resource lifecycles. This module models those hooks as
//! traits and plain request/response data, so provider logic stays
//! independent of any particular host wire protocol.

mod diagnostics;
mod ephemeral;
mod provider;
mod schema;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use ephemeral::{
    ConfigureRequest, ConfigureResponse, EphemeralResource, MetadataRequest, MetadataResponse,
    OpenRequest, OpenResponse,
};
pub use provider::{
    ConfigureProviderRequest, ConfigureProviderResponse, EphemeralResourceFactory, Provider,
    ProviderData, ProviderMetadata,
};
pub use schema::{Attribute, AttributeType, Schema};
