//! gopass store backend

use crate::store::GopassStore;
use async_trait::async_trait;
use passbridge_secrets::{Result, SecretStore, StoreBackend, StoreError};
use std::sync::Arc;
use tokio::process::Command;
use tracing::debug;

/// Default name of the gopass executable, resolved via `PATH`.
pub const DEFAULT_BINARY: &str = "gopass";

/// [`StoreBackend`] that opens a gopass store through its CLI.
///
/// Opening probes the store with `gopass ls --flat`, so a missing binary, an
/// uninitialized store, or unusable keys surface as a connection error
/// before any secret is requested.
#[derive(Debug, Clone)]
pub struct GopassBackend {
    binary: String,
}

impl GopassBackend {
    /// Create a backend using the `gopass` binary from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_binary(DEFAULT_BINARY)
    }

    /// Create a backend using a specific gopass executable.
    #[must_use]
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// The executable this backend invokes.
    #[must_use]
    pub fn binary(&self) -> &str {
        &self.binary
    }
}

impl Default for GopassBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoreBackend for GopassBackend {
    async fn open(&self) -> Result<Arc<dyn SecretStore>> {
        let output = Command::new(&self.binary)
            .args(["ls", "--flat"])
            .output()
            .await
            .map_err(|e| {
                StoreError::connection(format!("failed to run '{}': {e}", self.binary))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(StoreError::connection(format!(
                "'{} ls' failed: {}",
                self.binary,
                stderr.trim()
            )));
        }

        debug!(binary = %self.binary, "opened gopass store");
        Ok(Arc::new(GopassStore::new(self.binary.clone())))
    }

    fn backend_name(&self) -> &'static str {
        "gopass"
    }
}
