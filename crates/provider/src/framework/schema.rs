//! Schema declarations for providers and resources
//!
//! Schemas are plain data the host consumes: attribute names, types, and
//! the required/computed/sensitive flags that drive validation and
//! redaction. Sensitive attributes are masked in host output and, for
//! ephemeral results, never persisted.

use serde::Serialize;
use std::collections::BTreeMap;

/// Type of a schema attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    /// A single string value
    String,
    /// A map from string keys to string values
    MapOfString,
}

/// Declaration of one attribute in a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    /// Value type of the attribute
    pub value_type: AttributeType,

    /// Human-readable description shown in host documentation
    pub description: String,

    /// Whether the practitioner must set this attribute
    pub required: bool,

    /// Whether the provider computes this attribute
    pub computed: bool,

    /// Whether the value must be redacted in host output
    pub sensitive: bool,
}

impl Attribute {
    /// Declare an optional string attribute.
    #[must_use]
    pub fn string(description: impl Into<String>) -> Self {
        Self {
            value_type: AttributeType::String,
            description: description.into(),
            required: false,
            computed: false,
            sensitive: false,
        }
    }

    /// Declare an optional string-map attribute.
    #[must_use]
    pub fn string_map(description: impl Into<String>) -> Self {
        Self {
            value_type: AttributeType::MapOfString,
            description: description.into(),
            required: false,
            computed: false,
            sensitive: false,
        }
    }

    /// Mark the attribute as required input.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the attribute as computed by the provider.
    #[must_use]
    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    /// Mark the attribute as sensitive.
    #[must_use]
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }
}

/// Schema of a provider or resource: a description plus named attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    /// Human-readable description of the provider or resource
    pub description: String,

    /// Attribute declarations by name
    pub attributes: BTreeMap<String, Attribute>,
}

impl Schema {
    /// Create a schema with a description and no attributes.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Add an attribute declaration.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    /// Look up an attribute declaration by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }
}
