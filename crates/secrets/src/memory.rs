//! In-memory store backend
//!
//! Backs client and provider tests, and gives embedders a store that needs
//! no external tooling. Entries are raw entry text keyed by path and parsed
//! on every read, so the parsing path is exercised the same way as with a
//! real store.

use crate::error::{Result, StoreError};
use crate::secret::Secret;
use crate::store::{SecretStore, StoreBackend};
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Builder-style in-memory [`StoreBackend`].
///
/// Every successful [`open`](StoreBackend::open) increments a shared
/// counter, so tests can assert how many times a client actually connected.
/// Individual paths can be poisoned with
/// [`with_failing_path`](Self::with_failing_path) to simulate entries that
/// fail to decrypt.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    secrets: BTreeMap<String, String>,
    fail_paths: BTreeSet<String>,
    fail_open: bool,
    open_count: Arc<AtomicUsize>,
}

impl MemoryBackend {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `raw` entry text at `path`.
    #[must_use]
    pub fn with_secret(mut self, path: impl Into<String>, raw: impl Into<String>) -> Self {
        self.secrets.insert(path.into(), raw.into());
        self
    }

    /// Make every read of `path` fail with a backend error.
    #[must_use]
    pub fn with_failing_path(mut self, path: impl Into<String>) -> Self {
        self.fail_paths.insert(path.into());
        self
    }

    /// Make [`open`](StoreBackend::open) fail with a connection error.
    #[must_use]
    pub fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    /// Shared counter of successful opens.
    #[must_use]
    pub fn open_count_handle(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.open_count)
    }
}

#[async_trait]
impl StoreBackend for MemoryBackend {
    async fn open(&self) -> Result<Arc<dyn SecretStore>> {
        if self.fail_open {
            return Err(StoreError::connection("in-memory store refused to open"));
        }
        self.open_count.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(MemoryStore {
            secrets: self.secrets.clone(),
            fail_paths: self.fail_paths.clone(),
        }))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

/// Open handle produced by [`MemoryBackend`].
#[derive(Debug)]
pub struct MemoryStore {
    secrets: BTreeMap<String, String>,
    fail_paths: BTreeSet<String>,
}

#[async_trait]
impl SecretStore for MemoryStore {
    async fn get(&self, path: &str, _revision: &str) -> Result<Secret> {
        if self.fail_paths.contains(path) {
            return Err(StoreError::backend(format!(
                "injected failure for '{path}'"
            )));
        }
        self.secrets
            .get(path)
            .map(|raw| Secret::parse(raw))
            .ok_or_else(|| StoreError::not_found(path))
    }

    async fn list(&self) -> Result<Vec<String>> {
        Ok(self.secrets.keys().cloned().collect())
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
