//! JSON Schema checks for structured model responses
//!
//! Response schemas are plain JSON Schema documents. Providers forward them to
//! the model in whatever dialect the remote API accepts, and the parsed reply
//! is re-checked locally against the full schema.

use serde_json::Value;

/// Check `instance` against the JSON Schema `schema`
///
/// Every violation is reported as `<instance path>: <message>`; several
/// violations are joined with `; `. An unusable schema is an error too.
///
/// # Examples
///
/// ```
/// use folio_domain::schema;
/// use serde_json::json;
///
/// let names = json!({
///     "type": "object",
///     "properties": { "names": { "type": "array", "items": { "type": "string" } } },
///     "required": ["names"],
/// });
///
/// assert!(schema::validate(&names, &json!({ "names": ["Ada"] })).is_ok());
/// assert!(schema::validate(&names, &json!({})).is_err());
/// ```
pub fn validate(schema: &Value, instance: &Value) -> Result<(), String> {
    let validator =
        jsonschema::validator_for(schema).map_err(|e| format!("Invalid schema: {}", e))?;

    let errors: Vec<String> = validator
        .iter_errors(instance)
        .map(|e| {
            let path = e.instance_path.to_string();
            if path.is_empty() {
                format!("/: {}", e)
            } else {
                format!("{}: {}", path, e)
            }
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "names": { "type": "array", "items": { "type": "string" } },
                "note": { "type": "string" }
            },
            "required": ["names"],
            "additionalProperties": false
        })
    }

    #[test]
    fn test_valid_object() {
        let schema = names_schema();
        assert!(validate(&schema, &json!({ "names": ["a", "b"] })).is_ok());
        assert!(validate(&schema, &json!({ "names": [], "note": "n" })).is_ok());
    }

    #[test]
    fn test_missing_required_property() {
        let err = validate(&names_schema(), &json!({ "note": "n" })).unwrap_err();
        assert!(err.contains("names"));
    }

    #[test]
    fn test_wrong_item_type_reports_path() {
        let err = validate(&names_schema(), &json!({ "names": ["a", 3] })).unwrap_err();
        assert!(err.starts_with("/names/1: "), "unexpected error: {}", err);
    }

    #[test]
    fn test_null_is_not_an_array() {
        let err = validate(&names_schema(), &json!({ "names": null })).unwrap_err();
        assert!(err.starts_with("/names: "), "unexpected error: {}", err);
    }

    #[test]
    fn test_unexpected_property_rejected() {
        let err = validate(&names_schema(), &json!({ "names": [], "extra": 1 })).unwrap_err();
        assert!(err.contains("extra"));
    }

    #[test]
    fn test_top_level_type_mismatch() {
        let err = validate(&names_schema(), &json!("text")).unwrap_err();
        assert!(err.starts_with("/: "), "unexpected error: {}", err);
    }

    #[test]
    fn test_every_violation_is_reported() {
        let err = validate(&names_schema(), &json!({ "names": [1, 2] })).unwrap_err();
        assert!(err.contains("/names/0"));
        assert!(err.contains("/names/1"));
    }

    #[test]
    fn test_invalid_schema() {
        let err = validate(&json!({ "type": 12 }), &json!("x")).unwrap_err();
        assert!(err.starts_with("Invalid schema"));
    }
}
