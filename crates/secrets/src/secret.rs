//! Parsed secret entries
//!
//! A stored entry is plain text: the first line is the primary value
//! (conventionally the password), and subsequent `key: value` lines carry
//! named auxiliary fields such as usernames or URLs. Anything else in the
//! body is free-form and not addressable.

use crate::value::SecretValue;
use std::collections::BTreeMap;

/// A secret entry: primary value plus named auxiliary fields.
///
/// Both the primary value and every field value are [`SecretValue`]s, so
/// accidental Debug or Display output stays redacted.
#[derive(Debug, Clone)]
pub struct Secret {
    password: SecretValue,
    fields: BTreeMap<String, SecretValue>,
}

impl Secret {
    /// Create a secret with just a primary value and no fields.
    #[must_use]
    pub fn new(password: SecretValue) -> Self {
        Self {
            password,
            fields: BTreeMap::new(),
        }
    }

    /// Add a named field, replacing any previous value for the same name.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: SecretValue) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Parse the raw text of a stored entry.
    ///
    /// The first line becomes the primary value. Each subsequent line of the
    /// form `key: value` becomes a field: the key is trimmed and must be
    /// non-empty with no internal whitespace, the value is trimmed. Lines
    /// that do not match are free-form body and are ignored. A repeated key
    /// keeps the last value.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut lines = raw.lines();
        let password = SecretValue::new(lines.next().unwrap_or_default().to_string());
        let mut fields = BTreeMap::new();
        for line in lines {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() || key.contains(char::is_whitespace) {
                continue;
            }
            fields.insert(key.to_string(), SecretValue::new(value.trim().to_string()));
        }
        Self { password, fields }
    }

    /// The primary value (first line of the entry).
    #[must_use]
    pub fn password(&self) -> &SecretValue {
        &self.password
    }

    /// Consume the secret, keeping only the primary value.
    #[must_use]
    pub fn into_password(self) -> SecretValue {
        self.password
    }

    /// Look up a named field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&SecretValue> {
        self.fields.get(name)
    }

    /// All named fields, ordered by name.
    #[must_use]
    pub fn fields(&self) -> &BTreeMap<String, SecretValue> {
        &self.fields
    }
}
