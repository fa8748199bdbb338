//! Entity extraction: characters and locations from a source document

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::prompt::entity_prompt;
use folio_domain::traits::GenerationClient;
use folio_domain::{schema, truncate_chars, GenerationOutput, GenerationRequest, IdentifiedEntities};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Extracts named entities with a single schema-constrained request
pub struct EntityExtractor<C>
where
    C: GenerationClient,
{
    client: Arc<C>,
    config: AnalysisConfig,
}

impl<C> EntityExtractor<C>
where
    C: GenerationClient,
{
    /// Create a new EntityExtractor
    pub fn new(client: Arc<C>, config: AnalysisConfig) -> Self {
        Self { client, config }
    }

    /// Identify the characters and locations of a document
    ///
    /// Only the first `max_document_chars` characters of `document_text` are
    /// sent; `contract_text` is sent in full. Exactly one request is made.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::MissingConfiguration`] if the client has no
    ///   credential; no request is made.
    /// - [`AnalysisError::ExtractionFailed`] for any transport, parse or
    ///   schema failure. The cause is logged, not returned.
    pub async fn identify_entities(
        &self,
        document_text: &str,
        contract_text: &str,
    ) -> Result<IdentifiedEntities, AnalysisError> {
        if !self.client.is_configured() {
            error!("Entity extraction requested without a configured generation client");
            return Err(AnalysisError::MissingConfiguration);
        }

        let document = truncate_chars(document_text, self.config.max_document_chars);
        if document.len() < document_text.len() {
            debug!(
                "Document truncated to {} chars for entity extraction",
                self.config.max_document_chars
            );
        }

        let request = GenerationRequest::structured(
            entity_prompt(document, contract_text),
            self.config.extraction_temperature,
            IdentifiedEntities::schema(),
        );

        info!(
            "Identifying entities with model '{}', prompt length {} chars",
            self.client.model_name(),
            request.prompt.len()
        );

        let output = self.client.generate(&request).await.map_err(|e| {
            error!("Error identifying entities: {}", e);
            AnalysisError::ExtractionFailed
        })?;

        let entities = decode_entities(output).map_err(|reason| {
            error!("Error identifying entities: {}", reason);
            AnalysisError::ExtractionFailed
        })?;

        info!(
            "Identified {} characters and {} locations",
            entities.characters.len(),
            entities.locations.len()
        );

        Ok(entities)
    }
}

fn decode_entities(output: GenerationOutput) -> Result<IdentifiedEntities, String> {
    let value = match output {
        GenerationOutput::Structured(value) => value,
        // A client that ignored the structured mode still has to return JSON
        GenerationOutput::Text(text) => serde_json::from_str::<Value>(text.trim())
            .map_err(|e| format!("JSON parse error: {}", e))?,
    };

    schema::validate(&IdentifiedEntities::schema(), &value)?;

    serde_json::from_value(value).map_err(|e| format!("Invalid entity object: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_llm::MockProvider;
    use serde_json::json;

    fn create_test_extractor(response: &str) -> (EntityExtractor<MockProvider>, MockProvider) {
        let llm = MockProvider::new(response);
        let extractor = EntityExtractor::new(Arc::new(llm.clone()), AnalysisConfig::default());
        (extractor, llm)
    }

    #[tokio::test]
    async fn test_identify_entities_success() {
        let (extractor, llm) =
            create_test_extractor(r#"{"characters": ["Mara", "Teodor"], "locations": ["Harbor"]}"#);

        let entities = extractor
            .identify_entities("Mara met Teodor at the Harbor.", "CANON")
            .await
            .unwrap();

        assert_eq!(entities.characters, vec!["Mara", "Teodor"]);
        assert_eq!(entities.locations, vec!["Harbor"]);
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_request_is_structured_low_temperature() {
        let (extractor, llm) = create_test_extractor(r#"{"characters": [], "locations": []}"#);

        extractor.identify_entities("doc", "CANON").await.unwrap();

        let requests = llm.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].temperature, 0.1);
        assert_eq!(requests[0].schema(), Some(&IdentifiedEntities::schema()));
        assert!(requests[0].prompt.contains("CANON"));
    }

    #[tokio::test]
    async fn test_unconfigured_client_fails_before_request() {
        let llm = MockProvider::unconfigured();
        let extractor = EntityExtractor::new(Arc::new(llm.clone()), AnalysisConfig::default());

        let result = extractor.identify_entities("doc", "CANON").await;
        assert_eq!(result, Err(AnalysisError::MissingConfiguration));
        assert_eq!(llm.call_count(), 0);
    }

    #[test]
    fn test_decode_entities_from_text_output() {
        let entities = decode_entities(GenerationOutput::Text(
            r#" {"characters": ["A"], "locations": ["B"]} "#.to_string(),
        ))
        .unwrap();
        assert_eq!(entities.characters, vec!["A"]);
    }

    #[test]
    fn test_decode_entities_rejects_extra_keys_from_text_output() {
        let result = decode_entities(GenerationOutput::Text(
            r#"{"characters": [], "locations": [], "themes": ["loss"]}"#.to_string(),
        ));
        assert!(result.unwrap_err().contains("themes"));
    }

    #[test]
    fn test_decode_entities_rejects_partial_object() {
        let result = decode_entities(GenerationOutput::Structured(json!({ "characters": [] })));
        assert!(result.unwrap_err().contains("locations"));
    }
}
