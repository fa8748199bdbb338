//! Field module - checklist field identifiers and their opaque rules

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Identifier of a single checklist field
///
/// Field identifiers are opaque, path-like strings (for example
/// `"story.summary"` or `"characters/protagonist"`). Folio never parses them;
/// the order in which they are supplied defines generation order.
///
/// # Examples
///
/// ```
/// use folio_domain::FieldId;
///
/// let field = FieldId::from("story.summary");
/// assert_eq!(field.as_str(), "story.summary");
/// assert_eq!(field.to_string(), "story.summary");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    /// Create a new field identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FieldId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FieldId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FieldId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Opaque per-field generation rules
///
/// The orchestrator passes rules through to the prompt builder untouched.
/// Builders that understand the conventional layout (a JSON object keyed by
/// field identifier) can use [`FieldRules::rules_for`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldRules(Value);

impl FieldRules {
    /// Wrap an arbitrary JSON value as field rules
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Rules that carry no configuration at all
    pub fn empty() -> Self {
        Self(Value::Null)
    }

    /// Borrow the underlying JSON value
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Whether no rules were supplied
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }

    /// Look up the rules entry for a field by exact key
    ///
    /// Returns `None` when the rules are not a JSON object or hold no entry
    /// for this field.
    pub fn rules_for(&self, field: &FieldId) -> Option<&Value> {
        self.0.as_object().and_then(|map| map.get(field.as_str()))
    }
}

impl From<Value> for FieldRules {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
