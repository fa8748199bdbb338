//! Sequential, fail-fast generation of checklist fields

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::run::RunHandle;
use folio_domain::traits::{GenerationClient, PromptBuilder};
use folio_domain::{FieldId, FieldRules, GenerationRequest};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Inputs of one field-generation run
#[derive(Debug, Clone, Copy)]
pub struct FieldRunRequest<'a> {
    /// Source document, embedded by the prompt builder
    pub document_text: &'a str,

    /// Fields to generate, in generation order
    pub field_ids: &'a [FieldId],

    /// Canon text embedded in every prompt
    pub contract_text: &'a str,

    /// Opaque rules handed to the prompt builder
    pub field_rules: &'a FieldRules,
}

impl<'a> FieldRunRequest<'a> {
    /// Bundle the inputs of a run
    pub fn new(
        document_text: &'a str,
        field_ids: &'a [FieldId],
        contract_text: &'a str,
        field_rules: &'a FieldRules,
    ) -> Self {
        Self {
            document_text,
            field_ids,
            contract_text,
            field_rules,
        }
    }
}

/// Drives one generation request per field, strictly in order
///
/// Fields are never requested concurrently: the remote service is a shared,
/// rate-limited resource, and no field after a failing one may start.
pub struct FieldOrchestrator<C, P>
where
    C: GenerationClient,
    P: PromptBuilder,
{
    client: Arc<C>,
    prompt_builder: P,
    config: AnalysisConfig,
}

impl<C, P> FieldOrchestrator<C, P>
where
    C: GenerationClient,
    P: PromptBuilder,
{
    /// Create a new FieldOrchestrator
    pub fn new(client: Arc<C>, prompt_builder: P, config: AnalysisConfig) -> Self {
        Self {
            client,
            prompt_builder,
            config,
        }
    }

    /// Generate every field in `request.field_ids`
    ///
    /// `on_field_completed` receives each field and its trimmed content as
    /// soon as the field's response arrives, before the next field is
    /// requested. It fires at most once per field, in input order, and never
    /// after a failure.
    ///
    /// `run` is reset at the start and holds the terminal outcome at the end.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::MissingConfiguration`] if the client has no
    ///   credential; no field is processed.
    /// - [`AnalysisError::FieldGeneration`] for the first field whose request
    ///   fails; later fields are never requested.
    pub async fn generate_all_fields<F>(
        &self,
        run: &RunHandle,
        request: FieldRunRequest<'_>,
        mut on_field_completed: F,
    ) -> Result<(), AnalysisError>
    where
        F: FnMut(&FieldId, &str),
    {
        let run_id = run.begin();

        if !self.client.is_configured() {
            let err = AnalysisError::MissingConfiguration;
            error!("Run {} aborted: {}", run_id, err);
            run.fail(err.to_string());
            return Err(err);
        }

        info!(
            "Run {} started: {} fields with model '{}'",
            run_id,
            request.field_ids.len(),
            self.client.model_name()
        );

        for (idx, field) in request.field_ids.iter().enumerate() {
            let prompt = self.prompt_builder.build_field_prompt(
                field,
                request.document_text,
                request.contract_text,
                request.field_rules,
            );
            let generation = GenerationRequest::free_form(prompt, self.config.field_temperature);

            debug!(
                "Run {}: generating field {}/{} '{}'",
                run_id,
                idx + 1,
                request.field_ids.len(),
                field
            );

            match self.client.generate(&generation).await {
                Ok(output) => {
                    let text = output.into_text();
                    on_field_completed(field, text.trim());
                    run.record_completion();
                }
                Err(e) => {
                    error!("Run {}: error processing field {}: {}", run_id, field, e);
                    let err = AnalysisError::field_generation(field.clone(), &e, idx);
                    run.fail(err.to_string());
                    return Err(err);
                }
            }
        }

        run.finish();
        info!(
            "Run {} complete: {} fields generated",
            run_id,
            request.field_ids.len()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_llm::MockProvider;

    fn echo_builder(field: &FieldId, _doc: &str, _contract: &str, _rules: &FieldRules) -> String {
        field.to_string()
    }

    fn fields(ids: &[&str]) -> Vec<FieldId> {
        ids.iter().map(|id| FieldId::from(*id)).collect()
    }

    #[tokio::test]
    async fn test_content_is_trimmed() {
        let llm = MockProvider::new("\n  Generated prose.  \n");
        let orchestrator =
            FieldOrchestrator::new(Arc::new(llm), echo_builder, AnalysisConfig::default());
        let field_ids = fields(&["summary"]);
        let rules = FieldRules::empty();

        let mut delivered = Vec::new();
        orchestrator
            .generate_all_fields(
                &RunHandle::new(),
                FieldRunRequest::new("doc", &field_ids, "canon", &rules),
                |field, content| delivered.push((field.clone(), content.to_string())),
            )
            .await
            .unwrap();

        assert_eq!(delivered, vec![(FieldId::from("summary"), "Generated prose.".to_string())]);
    }

    #[tokio::test]
    async fn test_requests_are_free_form_moderate_temperature() {
        let llm = MockProvider::new("x");
        let orchestrator =
            FieldOrchestrator::new(Arc::new(llm.clone()), echo_builder, AnalysisConfig::default());
        let field_ids = fields(&["a", "b"]);
        let rules = FieldRules::empty();

        orchestrator
            .generate_all_fields(
                &RunHandle::new(),
                FieldRunRequest::new("doc", &field_ids, "canon", &rules),
                |_, _| {},
            )
            .await
            .unwrap();

        let requests = llm.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|r| !r.is_structured()));
        assert!(requests.iter().all(|r| r.temperature == 0.2));
        assert_eq!(requests[0].prompt, "a");
        assert_eq!(requests[1].prompt, "b");
    }

    #[tokio::test]
    async fn test_empty_field_list_succeeds() {
        let llm = MockProvider::new("x");
        let orchestrator =
            FieldOrchestrator::new(Arc::new(llm.clone()), echo_builder, AnalysisConfig::default());
        let rules = FieldRules::empty();
        let run = RunHandle::new();

        let mut calls = 0;
        orchestrator
            .generate_all_fields(&run, FieldRunRequest::new("doc", &[], "canon", &rules), |_, _| {
                calls += 1
            })
            .await
            .unwrap();

        assert_eq!(calls, 0);
        assert_eq!(llm.call_count(), 0);
        assert!(!run.is_analyzing());
        assert!(run.last_error().is_none());
    }

    #[tokio::test]
    async fn test_run_is_active_while_fields_are_delivered() {
        let llm = MockProvider::new("x");
        let orchestrator =
            FieldOrchestrator::new(Arc::new(llm), echo_builder, AnalysisConfig::default());
        let field_ids = fields(&["a", "b", "c"]);
        let rules = FieldRules::empty();
        let run = RunHandle::new();
        let observer = run.clone();

        let mut seen = Vec::new();
        orchestrator
            .generate_all_fields(
                &run,
                FieldRunRequest::new("doc", &field_ids, "canon", &rules),
                |_, _| seen.push((observer.is_analyzing(), observer.completed_fields())),
            )
            .await
            .unwrap();

        assert_eq!(seen, vec![(true, 0), (true, 1), (true, 2)]);
        assert!(!run.is_analyzing());
        assert_eq!(run.completed_fields(), 3);
    }
}
