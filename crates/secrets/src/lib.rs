//! Secret store client for passbridge
//!
//! Provides a backend-agnostic client for folder-structured password stores:
//! secrets live at slash-delimited paths, the first line of an entry is the
//! primary value, and `key: value` lines carry named fields. Concrete stores
//! (the gopass CLI, the in-memory test store) plug in behind the
//! [`StoreBackend`] and [`SecretStore`] traits.
//!
//! The store is opened lazily: a [`StoreClient`] connects on the first
//! operation that needs it, shares that handle across all later operations,
//! and releases it on [`StoreClient::close`].
//!
//! ```
//! use passbridge_secrets::{MemoryBackend, StoreClient};
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> passbridge_secrets::Result<()> {
//! let backend = MemoryBackend::new()
//!     .with_secret("infra/db/password", "secret1\nuser: alice\n");
//! let client = StoreClient::new(Arc::new(backend));
//!
//! let value = client.get_secret("infra/db/password").await?;
//! assert_eq!(value.expose(), "secret1");
//!
//! client.close().await;
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod memory;
pub mod path;
mod secret;
mod store;
mod value;

pub use client::{ChildFailure, ChildValues, StoreClient};
pub use error::{Result, StoreError};
pub use memory::{MemoryBackend, MemoryStore};
pub use secret::Secret;
pub use store::{LATEST_REVISION, SecretStore, StoreBackend};
pub use value::SecretValue;
