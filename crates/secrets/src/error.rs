//! Error types for the passbridge-secrets crate

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for secret store operations
#[derive(Error, Debug, Diagnostic)]
pub enum StoreError {
    /// The store could not be opened or reached
    #[error("Failed to connect to secret store: {message}")]
    #[diagnostic(code(passbridge_secrets::store::connection))]
    Connection {
        /// Description of the connection failure
        message: String,
    },

    /// No secret exists at the requested path
    #[error("Secret '{path}' not found in store")]
    #[diagnostic(code(passbridge_secrets::store::not_found))]
    NotFound {
        /// The path that was requested
        path: String,
    },

    /// The store accepted the call but failed while serving it
    #[error("Secret store call failed: {message}")]
    #[diagnostic(code(passbridge_secrets::store::backend))]
    Backend {
        /// Error reported by the underlying store
        message: String,
    },
}

impl StoreError {
    /// Create a connection error with a message
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a not-found error for a secret path
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create a backend error with a message
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Whether this error means the secret does not exist
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for secret store operations
pub type Result<T> = std::result::Result<T, StoreError>;
