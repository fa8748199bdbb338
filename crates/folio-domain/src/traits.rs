//! Trait definitions for external interactions
//!
//! These traits define the boundaries between orchestration logic and
//! infrastructure. Implementations live in other crates.

use crate::field::{FieldId, FieldRules};
use crate::generation::{GenerationOutput, GenerationRequest};
use async_trait::async_trait;

/// Trait for remote text-generation models
///
/// Implemented by the infrastructure layer (folio-llm). Timeouts and retry
/// policy, if any, belong to the implementation.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Error type for generation operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Model identifier requests are sent to
    fn model_name(&self) -> &str;

    /// Whether credentials are present
    ///
    /// Checked before any request is attempted so that a missing key never
    /// surfaces as a provider authentication failure.
    fn is_configured(&self) -> bool {
        true
    }

    /// Run one generation request
    ///
    /// Free-form requests yield [`GenerationOutput::Text`]. Structured
    /// requests yield [`GenerationOutput::Structured`] holding JSON that
    /// already matches the request schema.
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutput, Self::Error>;
}

/// Trait for building the prompt of a single checklist field
///
/// Builders are pure: the same inputs always give the same prompt.
pub trait PromptBuilder: Send + Sync {
    /// Render the prompt for `field`
    fn build_field_prompt(
        &self,
        field: &FieldId,
        document_text: &str,
        contract_text: &str,
        rules: &FieldRules,
    ) -> String;
}

impl<F> PromptBuilder for F
where
    F: Fn(&FieldId, &str, &str, &FieldRules) -> String + Send + Sync,
{
    fn build_field_prompt(
        &self,
        field: &FieldId,
        document_text: &str,
        contract_text: &str,
        rules: &FieldRules,
    ) -> String {
        self(field, document_text, contract_text, rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct EchoError;

    impl fmt::Display for EchoError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("echo error")
        }
    }

    impl std::error::Error for EchoError {}

    struct EchoClient;

    #[async_trait]
    impl GenerationClient for EchoClient {
        type Error = EchoError;

        fn model_name(&self) -> &str {
            "echo"
        }

        async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutput, Self::Error> {
            Ok(GenerationOutput::Text(request.prompt.clone()))
        }
    }

    #[tokio::test]
    async fn test_client_defaults_to_configured() {
        let client = EchoClient;
        assert!(client.is_configured());

        let output = client
            .generate(&GenerationRequest::free_form("hi", 0.0))
            .await
            .unwrap();
        assert_eq!(output, GenerationOutput::Text("hi".to_string()));
    }

    #[test]
    fn test_closure_prompt_builder() {
        let builder = |field: &FieldId, doc: &str, contract: &str, _rules: &FieldRules| {
            format!("{}|{}|{}", field, doc, contract)
        };

        let prompt = builder.build_field_prompt(
            &FieldId::from("summary"),
            "doc",
            "canon",
            &FieldRules::empty(),
        );
        assert_eq!(prompt, "summary|doc|canon");
    }
}
