//! Lazily-connected secret store client
//!
//! [`StoreClient`] wraps a [`StoreBackend`] behind a mutex-guarded,
//! initialize-once handle. The store is opened on first use, shared by every
//! subsequent operation, and released exactly once on [`StoreClient::close`].
//! All read operations take `&self` and are safe to call concurrently.

use crate::error::{Result, StoreError};
use crate::path;
use crate::secret::Secret;
use crate::store::{LATEST_REVISION, SecretStore, StoreBackend};
use crate::value::SecretValue;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// One failed child during group resolution.
#[derive(Debug)]
pub struct ChildFailure {
    /// Full path of the child secret that failed
    pub path: String,
    /// Child name relative to the requested prefix
    pub key: String,
    /// What went wrong
    pub error: StoreError,
}

/// Result of resolving a secret collection: the values that resolved plus
/// the children that did not.
///
/// A failing child never aborts the rest of the group; callers inspect
/// [`failures`](Self::failures) and decide whether partial data is
/// acceptable.
#[derive(Debug, Default)]
pub struct ChildValues {
    values: BTreeMap<String, SecretValue>,
    failures: Vec<ChildFailure>,
}

impl ChildValues {
    /// Resolved values, keyed by child name relative to the prefix.
    #[must_use]
    pub fn values(&self) -> &BTreeMap<String, SecretValue> {
        &self.values
    }

    /// Children that failed to resolve.
    #[must_use]
    pub fn failures(&self) -> &[ChildFailure] {
        &self.failures
    }

    /// Whether every listed child resolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of resolved values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no child resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consume the result, keeping only the resolved values.
    #[must_use]
    pub fn into_values(self) -> BTreeMap<String, SecretValue> {
        self.values
    }
}

/// Client wrapper around a lazily-opened secret store.
///
/// The wrapped store is opened at most once per connected lifetime: the
/// first operation to need it performs the open under the lock, and every
/// later operation reuses the shared handle. After [`close`](Self::close)
/// the next operation reconnects.
pub struct StoreClient {
    backend: Arc<dyn StoreBackend>,
    store: Mutex<Option<Arc<dyn SecretStore>>>,
}

impl StoreClient {
    /// Create a client over `backend`. No connection is made until the
    /// first operation needs one.
    #[must_use]
    pub fn new(backend: Arc<dyn StoreBackend>) -> Self {
        Self {
            backend,
            store: Mutex::new(None),
        }
    }

    /// Open the store if it is not already open.
    ///
    /// Safe to call concurrently; of N racing callers, exactly one performs
    /// the open and the rest observe the shared handle.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] when the backend cannot open the
    /// store.
    pub async fn ensure_connected(&self) -> Result<()> {
        self.connected_store().await?;
        Ok(())
    }

    async fn connected_store(&self) -> Result<Arc<dyn SecretStore>> {
        let mut guard = self.store.lock().await;
        if let Some(store) = guard.as_ref() {
            return Ok(Arc::clone(store));
        }
        debug!(backend = self.backend.backend_name(), "opening secret store");
        let store = self.backend.open().await?;
        *guard = Some(Arc::clone(&store));
        Ok(store)
    }

    /// Fetch the primary value of the secret at `path`, at the latest
    /// revision.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when `path` does not exist and
    /// [`StoreError::Backend`] when the store call fails.
    pub async fn get_secret(&self, path: &str) -> Result<SecretValue> {
        Ok(self.get_secret_full(path).await?.into_password())
    }

    /// Fetch the secret at `path` with all of its named fields, at the
    /// latest revision.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`get_secret`](Self::get_secret).
    pub async fn get_secret_full(&self, path: &str) -> Result<Secret> {
        let store = self.connected_store().await?;
        debug!(path, "reading secret");
        store.get(path, LATEST_REVISION).await
    }

    /// List the immediate children of `prefix`, as full paths.
    ///
    /// Trailing separators on `prefix` are ignored, and paths nested more
    /// than one level below it are excluded. A prefix with no children
    /// yields an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the store listing fails.
    pub async fn list_children(&self, prefix: &str) -> Result<Vec<String>> {
        let store = self.connected_store().await?;
        let prefix = path::normalize_prefix(prefix);
        let all = store.list().await?;
        let children = path::immediate_children(all.iter().map(String::as_str), prefix);
        debug!(prefix, count = children.len(), "listed immediate children");
        Ok(children)
    }

    /// Resolve the primary value of every immediate child of `prefix`.
    ///
    /// Children are resolved one at a time; a store that prompts for a key
    /// must not be asked for several decryptions at once. A child that fails
    /// is logged at warn, recorded in the result, and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error only when the listing itself fails; per-child
    /// failures are reported in [`ChildValues::failures`].
    pub async fn get_child_values(&self, prefix: &str) -> Result<ChildValues> {
        let prefix = path::normalize_prefix(prefix);
        let children = self.list_children(prefix).await?;
        let mut result = ChildValues::default();
        for child in children {
            let Some(key) = path::child_key(&child, prefix).map(ToString::to_string) else {
                continue;
            };
            match self.get_secret(&child).await {
                Ok(value) => {
                    result.values.insert(key, value);
                }
                Err(error) => {
                    warn!(path = %child, %error, "skipping unreadable child secret");
                    result.failures.push(ChildFailure {
                        path: child,
                        key,
                        error,
                    });
                }
            }
        }
        Ok(result)
    }

    /// Release the store handle if one is open.
    ///
    /// Idempotent; calling before any connection is a no-op. A failing close
    /// is logged and swallowed, and a later operation may reconnect.
    pub async fn close(&self) {
        let store = self.store.lock().await.take();
        match store {
            None => debug!("secret store already closed"),
            Some(store) => {
                debug!(backend = store.backend_name(), "closing secret store");
                if let Err(error) = store.close().await {
                    warn!(%error, "failed to close secret store");
                }
            }
        }
    }
}

impl std::fmt::Debug for StoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreClient")
            .field("backend", &self.backend.backend_name())
            .finish_non_exhaustive()
    }
}
