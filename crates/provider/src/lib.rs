//! gopass ephemeral resources for provisioning hosts
//!
//! Exposes a local gopass password store to an infrastructure-as-code host
//! as two ephemeral resource types: `gopass_secret` (one secret by path)
//! and `gopass_env` (every secret directly under a folder, as a map).
//! Resolved values live only inside the open operation that requested them
//! and are never written to plan or state.
//!
//! The [`framework`] module models the host-mandated lifecycle hooks;
//! [`GopassProvider`] implements them over a shared
//! [`StoreClient`](passbridge_secrets::StoreClient).
//!
//! ```
//! use passbridge_provider::GopassProvider;
//! use passbridge_provider::framework::{
//!     ConfigureProviderRequest, ConfigureRequest, EphemeralResource, OpenRequest, Provider,
//! };
//! use passbridge_secrets::MemoryBackend;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let backend = MemoryBackend::new().with_secret("infra/db/password", "secret1\n");
//! let provider = GopassProvider::with_backend("0.1.0", Arc::new(backend));
//!
//! let configured = provider.configure(ConfigureProviderRequest::default()).await;
//! let factory = provider.ephemeral_resources()[0];
//! let mut resource = factory();
//! resource.configure(ConfigureRequest {
//!     provider_data: configured.provider_data,
//! });
//!
//! let response = resource
//!     .open(OpenRequest::new(json!({"path": "infra/db/password"})))
//!     .await;
//! assert_eq!(response.result.unwrap()["value"], "secret1");
//! provider.close().await;
//! # }
//! ```

pub mod framework;

mod env;
mod provider;
mod secret;

pub use env::EnvEphemeral;
pub use provider::GopassProvider;
pub use secret::SecretEphemeral;
