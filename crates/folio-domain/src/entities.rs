//! Entities module - characters and locations identified in a source document

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Named entities extracted from a source document
///
/// Both lists keep the order the model produced them in. Duplicates are
/// tolerated; missing keys are not. Deserialization fails when either key is
/// absent, when any element is not a string, or when unknown keys are present.
///
/// # Examples
///
/// ```
/// use folio_domain::IdentifiedEntities;
///
/// let entities: IdentifiedEntities =
///     serde_json::from_str(r#"{"characters": ["Ada"], "locations": []}"#).unwrap();
/// assert_eq!(entities.characters, vec!["Ada"]);
/// assert!(entities.locations.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdentifiedEntities {
    /// Protagonist, antagonist and key supporting character names
    pub characters: Vec<String>,

    /// Most significant recurring location names
    pub locations: Vec<String>,
}

impl IdentifiedEntities {
    /// Strict output schema requested from the model
    ///
    /// Object with required `characters` and `locations`, each an array of
    /// strings, and no other keys.
    pub fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "characters": { "type": "array", "items": { "type": "string" } },
                "locations": { "type": "array", "items": { "type": "string" } }
            },
            "required": ["characters", "locations"],
            "additionalProperties": false
        })
    }

    /// Whether neither characters nor locations were found
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty() && self.locations.is_empty()
    }
}
