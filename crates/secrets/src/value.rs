//! Redacting wrapper for resolved secret values

use secrecy::{ExposeSecret, SecretString};

/// A resolved secret value with automatic memory zeroing on drop.
///
/// This type wraps `secrecy::SecretString` to ensure:
/// - Secret values are zeroed from memory when dropped
/// - Debug and Display output show `[REDACTED]` instead of the actual value
/// - An explicit `.expose()` call is required to access the value
///
/// # Example
///
/// ```
/// use passbridge_secrets::SecretValue;
///
/// let value = SecretValue::new("hunter2".to_string());
/// assert_eq!(format!("{value:?}"), "[REDACTED]");
/// assert_eq!(value.expose(), "hunter2");
/// ```
#[derive(Clone)]
pub struct SecretValue {
    inner: SecretString,
}

impl SecretValue {
    /// Create a new secret value from a string.
    ///
    /// The string is moved into secure storage and zeroed when this
    /// `SecretValue` is dropped.
    #[must_use]
    pub fn new(value: String) -> Self {
        Self {
            inner: SecretString::from(value),
        }
    }

    /// Expose the plaintext for use.
    ///
    /// The caller must ensure the exposed value is not logged, not persisted,
    /// and used only for the immediate operation.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.inner.expose_secret()
    }

    /// Length of the plaintext without exposing it.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.expose_secret().len()
    }

    /// Whether the plaintext is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.expose_secret().is_empty()
    }
}

impl From<&str> for SecretValue {
    fn from(value: &str) -> Self {
        Self::new(value.to_string())
    }
}

impl std::fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl std::fmt::Display for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}
