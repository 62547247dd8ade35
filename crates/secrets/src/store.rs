//! Store boundary traits
//!
//! A [`StoreBackend`] knows how to open a password store; a [`SecretStore`]
//! is an open handle that serves reads. Both are object-safe so a client can
//! hold them as trait objects and backends can be swapped for tests.

use crate::error::Result;
use crate::secret::Secret;
use async_trait::async_trait;
use std::sync::Arc;

/// Revision selector for the newest version of a secret.
pub const LATEST_REVISION: &str = "latest";

/// An open handle onto a secret store.
///
/// Implementations must be safe for concurrent reads; serialization, if the
/// underlying store needs it, is the implementation's concern.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch the secret at `path`.
    ///
    /// `revision` selects a version; [`LATEST_REVISION`] selects the newest.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`](crate::StoreError::NotFound) when no
    /// secret exists at `path`, and
    /// [`StoreError::Backend`](crate::StoreError::Backend) when the store
    /// call fails. An absent secret is never reported as an empty success.
    async fn get(&self, path: &str, revision: &str) -> Result<Secret>;

    /// List every secret path in the store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`](crate::StoreError::Backend) when the
    /// listing fails.
    async fn list(&self) -> Result<Vec<String>>;

    /// Release the handle.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`](crate::StoreError::Backend) when the
    /// store rejects the close.
    async fn close(&self) -> Result<()>;

    /// Short identifier for the backing store kind, used in logs.
    fn backend_name(&self) -> &'static str;
}

/// Factory for [`SecretStore`] handles.
#[async_trait]
pub trait StoreBackend: Send + Sync {
    /// Open the store this backend points at.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`](crate::StoreError::Connection)
    /// when the store cannot be opened or reached.
    async fn open(&self) -> Result<Arc<dyn SecretStore>>;

    /// Short identifier for the backing store kind, used in logs.
    fn backend_name(&self) -> &'static str;
}
