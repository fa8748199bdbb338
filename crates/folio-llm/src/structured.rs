//! Decoding of schema-constrained responses

use crate::LlmError;
use folio_domain::{schema, GenerationMode, GenerationOutput, GenerationRequest};
use serde_json::Value;

/// Parse model text as JSON and check it against the JSON Schema `schema`
///
/// Models sometimes wrap JSON in a markdown code fence even when asked not
/// to, so a single surrounding fence is stripped first.
pub fn decode_structured(text: &str, response_schema: &Value) -> Result<Value, LlmError> {
    let json_str = strip_code_fence(text);

    let value: Value = serde_json::from_str(json_str)
        .map_err(|e| LlmError::InvalidResponse(format!("JSON parse error: {}", e)))?;

    schema::validate(response_schema, &value).map_err(LlmError::SchemaViolation)?;

    Ok(value)
}

/// Turn raw model text into the output variant the request asked for
pub(crate) fn shape_output(
    text: String,
    request: &GenerationRequest,
) -> Result<GenerationOutput, LlmError> {
    match &request.mode {
        GenerationMode::FreeForm => Ok(GenerationOutput::Text(text)),
        GenerationMode::Structured { schema: response_schema } => {
            decode_structured(&text, response_schema).map(GenerationOutput::Structured)
        }
    }
}

fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();

    if !trimmed.starts_with("```") {
        return trimmed;
    }

    // Skip the opening fence line (``` or ```json) and the closing fence
    let body = match trimmed.find('\n') {
        Some(idx) => &trimmed[idx + 1..],
        None => return "",
    };
    body.trim_end().trim_end_matches("```").trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_domain::IdentifiedEntities;
    use serde_json::json;

    #[test]
    fn test_decode_plain_json() {
        let value = decode_structured(
            r#"{"characters": ["Ada"], "locations": ["Mill"]}"#,
            &IdentifiedEntities::schema(),
        )
        .unwrap();
        assert_eq!(value, json!({ "characters": ["Ada"], "locations": ["Mill"] }));
    }

    #[test]
    fn test_decode_fenced_json() {
        let response = "```json\n{\"characters\": [], \"locations\": []}\n```";
        let value = decode_structured(response, &IdentifiedEntities::schema()).unwrap();
        assert_eq!(value, json!({ "characters": [], "locations": [] }));
    }

    #[test]
    fn test_decode_fence_without_language() {
        let response = "```\n{\"characters\": [], \"locations\": []}\n```";
        assert!(decode_structured(response, &IdentifiedEntities::schema()).is_ok());
    }

    #[test]
    fn test_decode_invalid_json() {
        let result = decode_structured("This is not JSON", &IdentifiedEntities::schema());
        assert!(matches!(result, Err(LlmError::InvalidResponse(_))));
    }

    #[test]
    fn test_decode_empty_fence() {
        let result = decode_structured("```", &IdentifiedEntities::schema());
        assert!(matches!(result, Err(LlmError::InvalidResponse(_))));
    }

    #[test]
    fn test_decode_schema_violation() {
        let result = decode_structured(
            r#"{"characters": "Ada", "locations": []}"#,
            &IdentifiedEntities::schema(),
        );
        match result {
            Err(LlmError::SchemaViolation(reason)) => {
                assert!(reason.starts_with("/characters: "), "unexpected: {}", reason);
            }
            other => panic!("Expected SchemaViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_unknown_keys() {
        let result = decode_structured(
            r#"{"characters": [], "locations": [], "themes": ["loss"]}"#,
            &IdentifiedEntities::schema(),
        );
        match result {
            Err(LlmError::SchemaViolation(reason)) => assert!(reason.contains("themes")),
            other => panic!("Expected SchemaViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_shape_output_free_form_keeps_text() {
        let request = GenerationRequest::free_form("p", 0.2);
        let output = shape_output("  raw text  ".to_string(), &request).unwrap();
        assert_eq!(output, GenerationOutput::Text("  raw text  ".to_string()));
    }
}
