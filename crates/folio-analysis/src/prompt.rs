//! LLM prompt engineering for extraction and field generation

use folio_domain::traits::PromptBuilder;
use folio_domain::{FieldId, FieldRules};

/// Build the entity extraction prompt
///
/// `document_text` must already be truncated; `contract_text` is embedded
/// verbatim.
pub(crate) fn entity_prompt(document_text: &str, contract_text: &str) -> String {
    let mut prompt = String::new();

    // 1. Canon the model must respect
    prompt.push_str(contract_text);
    prompt.push_str("\n\n");

    // 2. Task
    prompt.push_str(ENTITY_INSTRUCTIONS);
    prompt.push_str("\n\n");

    // 3. The text to analyze
    prompt.push_str("Source document (authoritative):\n");
    prompt.push_str("---\n");
    prompt.push_str(document_text);
    prompt.push_str("\n---\n\n");

    // 4. Output format reminder
    prompt.push_str(ENTITY_OUTPUT_REMINDER);

    prompt
}

const ENTITY_INSTRUCTIONS: &str = r#"Task: identify the primary characters and locations of the source document below.
- Characters: the names of the protagonist, the antagonist and the key supporting characters.
- Locations: the names of the most significant settings that recur throughout the document.
- Return a JSON object with exactly two keys, "characters" and "locations", each an array of strings."#;

const ENTITY_OUTPUT_REMINDER: &str =
    "Respond with the JSON object only. No markdown code blocks, no explanations.";

/// Default prompt builder for checklist fields
///
/// Renders the contract, a task line naming the field, the field's rules when
/// [`FieldRules::rules_for`] finds an entry, the source document, and an
/// output reminder.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChecklistPromptBuilder;

impl ChecklistPromptBuilder {
    /// Create a new prompt builder
    pub fn new() -> Self {
        Self
    }
}

impl PromptBuilder for ChecklistPromptBuilder {
    fn build_field_prompt(
        &self,
        field: &FieldId,
        document_text: &str,
        contract_text: &str,
        rules: &FieldRules,
    ) -> String {
        let mut prompt = String::new();

        prompt.push_str(contract_text);
        prompt.push_str("\n\n");

        prompt.push_str(&format!("Task: write the content of checklist field `{}`.\n", field));
        prompt.push_str(FIELD_INSTRUCTIONS);
        prompt.push_str("\n\n");

        if let Some(field_rules) = rules.rules_for(field) {
            prompt.push_str("Rules for this field:\n");
            match field_rules.as_str() {
                Some(text) => prompt.push_str(text),
                None => {
                    let rendered = serde_json::to_string_pretty(field_rules)
                        .unwrap_or_else(|_| field_rules.to_string());
                    prompt.push_str(&rendered);
                }
            }
            prompt.push_str("\n\n");
        }

        prompt.push_str("Source document (authoritative):\n");
        prompt.push_str("---\n");
        prompt.push_str(document_text);
        prompt.push_str("\n---\n\n");

        prompt.push_str(FIELD_OUTPUT_REMINDER);

        prompt
    }
}

const FIELD_INSTRUCTIONS: &str = r#"- Base every statement on the source document and the canon above.
- Never contradict the canon; when the document is silent, say so instead of inventing."#;

const FIELD_OUTPUT_REMINDER: &str =
    "Respond with the field content only, without headings, labels or commentary.";
