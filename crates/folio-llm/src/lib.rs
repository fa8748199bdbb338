//! Folio LLM Provider Layer
//!
//! Implementations of the `GenerationClient` trait from `folio-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `GeminiProvider`: Google Gemini `generateContent` API
//!
//! Both providers decode structured responses the same way: the text is
//! parsed as JSON and checked against the request's schema before it is
//! handed back.
//!
//! # Examples
//!
//! ```
//! use folio_domain::traits::GenerationClient;
//! use folio_domain::{GenerationOutput, GenerationRequest};
//! use folio_llm::MockProvider;
//!
//! let provider = MockProvider::new("Hello from LLM!");
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let result = rt
//!     .block_on(provider.generate(&GenerationRequest::free_form("test prompt", 0.2)))
//!     .unwrap();
//! assert_eq!(result, GenerationOutput::Text("Hello from LLM!".to_string()));
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod gemini;
pub mod structured;

use async_trait::async_trait;
use folio_domain::traits::GenerationClient;
use folio_domain::{GenerationOutput, GenerationRequest};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

pub use config::GeminiConfig;
pub use gemini::GeminiProvider;
pub use structured::decode_structured;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Structured response does not match the requested schema
    #[error("Response does not match schema: {0}")]
    SchemaViolation(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Provider rejected the credentials
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// No API key configured
    #[error("API key is not configured")]
    NotConfigured,

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error(String),
}

/// Mock LLM provider for deterministic testing
///
/// This provider returns pre-configured responses without making any network
/// calls. Responses are keyed by exact prompt text; unknown prompts get the
/// default response. Every request is recorded for later inspection.
///
/// # Examples
///
/// ```
/// use folio_llm::MockProvider;
///
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
/// provider.add_error("prompt2", "quota exhausted");
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    model: String,
    configured: bool,
    responses: Arc<Mutex<HashMap<String, MockReply>>>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            model: "mock".to_string(),
            configured: true,
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a provider that reports missing credentials
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::default()
        }
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.lock_responses()
            .insert(prompt.into(), MockReply::Text(response.into()));
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>, message: impl Into<String>) {
        self.lock_responses()
            .insert(prompt.into(), MockReply::Error(message.into()));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.lock_requests().len()
    }

    /// Every request received so far, in call order
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.lock_requests().clone()
    }

    /// Forget recorded requests
    pub fn reset_call_count(&self) {
        self.lock_requests().clear();
    }

    fn lock_responses(&self) -> std::sync::MutexGuard<'_, HashMap<String, MockReply>> {
        self.responses.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_requests(&self) -> std::sync::MutexGuard<'_, Vec<GenerationRequest>> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl GenerationClient for MockProvider {
    type Error = LlmError;

    fn model_name(&self) -> &str {
        &self.model
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutput, Self::Error> {
        self.lock_requests().push(request.clone());

        if !self.configured {
            return Err(LlmError::NotConfigured);
        }

        let reply = self
            .lock_responses()
            .get(&request.prompt)
            .cloned()
            .unwrap_or_else(|| MockReply::Text(self.default_response.clone()));

        match reply {
            MockReply::Text(text) => structured::shape_output(text, request),
            MockReply::Error(message) => Err(LlmError::Other(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_domain::IdentifiedEntities;
    use serde_json::json;

    fn free_form(prompt: &str) -> GenerationRequest {
        GenerationRequest::free_form(prompt, 0.2)
    }

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate(&free_form("any prompt")).await;
        assert_eq!(result.unwrap(), GenerationOutput::Text("Test response".to_string()));
    }

    #[tokio::test]
    async fn test_mock_provider_specific_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(
            provider.generate(&free_form("hello")).await.unwrap().into_text(),
            "world"
        );
        assert_eq!(
            provider.generate(&free_form("foo")).await.unwrap().into_text(),
            "bar"
        );
        assert_eq!(
            provider.generate(&free_form("unknown")).await.unwrap().into_text(),
            "Default mock response"
        );
    }

    #[tokio::test]
    async fn test_mock_provider_call_count_and_log() {
        let provider = MockProvider::new("test");
        assert_eq!(provider.call_count(), 0);

        provider.generate(&free_form("prompt1")).await.unwrap();
        provider.generate(&free_form("prompt2")).await.unwrap();
        assert_eq!(provider.call_count(), 2);

        let prompts: Vec<_> = provider.requests().into_iter().map(|r| r.prompt).collect();
        assert_eq!(prompts, vec!["prompt1", "prompt2"]);

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad prompt", "quota exhausted");

        let result = provider.generate(&free_form("bad prompt")).await;
        match result {
            Err(LlmError::Other(message)) => assert_eq!(message, "quota exhausted"),
            other => panic!("Expected Other error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_mock_provider_structured() {
        let provider = MockProvider::new(r#"{"characters": ["Ada"], "locations": []}"#);
        let request =
            GenerationRequest::structured("extract", 0.1, IdentifiedEntities::schema());

        let output = provider.generate(&request).await.unwrap();
        assert_eq!(
            output,
            GenerationOutput::Structured(json!({ "characters": ["Ada"], "locations": [] }))
        );
    }

    #[tokio::test]
    async fn test_mock_provider_structured_schema_violation() {
        let provider = MockProvider::new(r#"{"characters": ["Ada"]}"#);
        let request =
            GenerationRequest::structured("extract", 0.1, IdentifiedEntities::schema());

        let result = provider.generate(&request).await;
        assert!(matches!(result, Err(LlmError::SchemaViolation(_))));
    }

    #[tokio::test]
    async fn test_mock_provider_structured_not_json() {
        let provider = MockProvider::new("not json at all");
        let request = GenerationRequest::structured("extract", 0.1, json!({ "type": "string" }));

        let result = provider.generate(&request).await;
        assert!(matches!(result, Err(LlmError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_mock_provider_unconfigured() {
        let provider = MockProvider::unconfigured();
        assert!(!provider.is_configured());

        let result = provider.generate(&free_form("x")).await;
        assert!(matches!(result, Err(LlmError::NotConfigured)));
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_state() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.generate(&free_form("test")).await.unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
