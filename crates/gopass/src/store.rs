//! Open gopass store handle

use async_trait::async_trait;
use passbridge_secrets::{LATEST_REVISION, Result, Secret, SecretStore, StoreError};
use std::process::Output;
use tokio::process::Command;
use tracing::debug;

/// Open handle onto a gopass store, produced by
/// [`GopassBackend`](crate::GopassBackend).
///
/// Reads shell out to `gopass show -f`; the full entry text is parsed into a
/// [`Secret`]. gopass holds no persistent connection, so the handle itself
/// is just the resolved binary name.
#[derive(Debug)]
pub struct GopassStore {
    binary: String,
}

impl GopassStore {
    pub(crate) fn new(binary: String) -> Self {
        Self { binary }
    }

    async fn run(&self, args: &[&str]) -> Result<Output> {
        Command::new(&self.binary)
            .args(args)
            .output()
            .await
            .map_err(|e| StoreError::backend(format!("failed to run '{}': {e}", self.binary)))
    }
}

/// Whether a gopass error message means the entry does not exist.
///
/// gopass and pass word this differently across versions ("not found",
/// "is not in the password store"), so match loosely.
fn is_not_found(stderr: &str) -> bool {
    let lower = stderr.to_lowercase();
    lower.contains("not found") || lower.contains("not in the password store")
}

#[async_trait]
impl SecretStore for GopassStore {
    async fn get(&self, path: &str, revision: &str) -> Result<Secret> {
        let mut args = vec!["show", "-f"];
        if revision != LATEST_REVISION {
            args.push("--revision");
            args.push(revision);
        }
        args.push(path);

        let output = self.run(&args).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if is_not_found(&stderr) {
                return Err(StoreError::not_found(path));
            }
            return Err(StoreError::backend(format!(
                "'{} show' failed for '{path}': {}",
                self.binary,
                stderr.trim()
            )));
        }

        debug!(path, "gopass secret read");
        Ok(Secret::parse(&String::from_utf8_lossy(&output.stdout)))
    }

    async fn list(&self) -> Result<Vec<String>> {
        let output = self.run(&["ls", "--flat"]).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(StoreError::backend(format!(
                "'{} ls' failed: {}",
                self.binary,
                stderr.trim()
            )));
        }

        let paths: Vec<String> = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToString::to_string)
            .collect();
        debug!(count = paths.len(), "gopass store listed");
        Ok(paths)
    }

    async fn close(&self) -> Result<()> {
        // The CLI holds no session to tear down.
        debug!(binary = %self.binary, "gopass store handle released");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "gopass"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_matches_gopass_wording() {
        assert!(is_not_found("Error: secret not found: infra/db"));
        assert!(is_not_found("Error: infra/db is not in the password store"));
        assert!(is_not_found("Entry is Not Found"));
    }

    #[test]
    fn other_failures_are_not_not_found() {
        assert!(!is_not_found("gpg: decryption failed: No secret key"));
        assert!(!is_not_found("store is locked"));
        assert!(!is_not_found(""));
    }

    #[tokio::test]
    async fn read_with_missing_binary_is_a_backend_error() {
        let store = GopassStore::new("/nonexistent/path/to/gopass".to_string());
        let err = store.get("a/b", LATEST_REVISION).await.unwrap_err();
        assert!(matches!(err, StoreError::Backend { .. }));
    }
}
