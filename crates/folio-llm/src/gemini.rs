//! Gemini Provider Implementation
//!
//! Integration with the Google Gemini `generateContent` REST API.
//!
//! # Features
//!
//! - Async HTTP communication via reqwest
//! - Free-form and schema-constrained (`application/json`) requests
//! - Retry with exponential backoff on transport errors, 429 and 5xx
//! - Per-request timeout
//!
//! # Examples
//!
//! ```no_run
//! use folio_llm::{GeminiConfig, GeminiProvider};
//!
//! let provider = GeminiProvider::new(GeminiConfig::from_env()).unwrap();
//! ```

use crate::config::GeminiConfig;
use crate::structured::shape_output;
use crate::LlmError;
use async_trait::async_trait;
use folio_domain::traits::GenerationClient;
use folio_domain::{GenerationOutput, GenerationRequest};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Gemini API provider
pub struct GeminiProvider {
    config: GeminiConfig,
    client: reqwest::Client,
}

/// Request body for the generateContent API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

/// Response from the generateContent API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    prompt_feedback: Option<GeminiPromptFeedback>,
    #[serde(default)]
    usage_metadata: Option<GeminiUsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiResponseContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsageMetadata {
    #[serde(default)]
    prompt_token_count: Option<u32>,
    #[serde(default)]
    candidates_token_count: Option<u32>,
    #[serde(default)]
    total_token_count: Option<u32>,
}

/// Outcome of one HTTP attempt
enum Attempt {
    Done(Result<String, LlmError>),
    Retry(LlmError),
}

impl GeminiProvider {
    /// Create a new Gemini provider
    ///
    /// A missing API key is not an error here; the provider reports itself
    /// unconfigured and refuses to send requests.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: GeminiConfig) -> Result<Self, LlmError> {
        config.validate().map_err(LlmError::Other)?;

        if !config.has_api_key() {
            warn!("Gemini API key not set; generation requests will fail");
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| LlmError::Communication(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Set the maximum number of attempts per request
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = max_retries.max(1);
        self
    }

    /// The provider configuration
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Send a request and return the raw response text
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - No API key is configured
    /// - The key is rejected
    /// - The model is not available
    /// - Network communication fails after all attempts
    /// - The response carries no candidate text
    pub async fn generate_text(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        let api_key = match self.config.api_key.as_deref() {
            Some(key) if self.config.has_api_key() => key,
            _ => return Err(LlmError::NotConfigured),
        };

        let url = self.url();
        let body = build_request_body(request);

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.config.max_retries {
            match self.attempt(&url, api_key, &body).await {
                Attempt::Done(result) => return result,
                Attempt::Retry(e) => {
                    warn!("Gemini request attempt {} failed: {}", attempts + 1, e);
                    last_error = Some(e);
                }
            }

            attempts += 1;
            if attempts < self.config.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }

    async fn attempt(&self, url: &str, api_key: &str, body: &GeminiRequest) -> Attempt {
        let response = match self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                return Attempt::Retry(LlmError::Communication(format!("Request failed: {}", e)))
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                return Attempt::Retry(LlmError::Communication(format!(
                    "Failed to read response body: {}",
                    e
                )))
            }
        };

        debug!("Gemini API response status: {}", status);

        if status.is_success() {
            return Attempt::Done(parse_response_text(&text));
        }

        match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                Attempt::Done(Err(LlmError::Authentication(format!("HTTP {}: {}", status, text))))
            }
            reqwest::StatusCode::NOT_FOUND => {
                Attempt::Done(Err(LlmError::ModelNotAvailable(self.config.model.clone())))
            }
            reqwest::StatusCode::TOO_MANY_REQUESTS => Attempt::Retry(LlmError::RateLimitExceeded),
            s if s.is_server_error() => {
                Attempt::Retry(LlmError::Communication(format!("HTTP {}: {}", status, text)))
            }
            _ => Attempt::Done(Err(LlmError::Communication(format!("HTTP {}: {}", status, text)))),
        }
    }
}

#[async_trait]
impl GenerationClient for GeminiProvider {
    type Error = LlmError;

    fn model_name(&self) -> &str {
        &self.config.model
    }

    fn is_configured(&self) -> bool {
        self.config.has_api_key()
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutput, Self::Error> {
        let text = self.generate_text(request).await?;
        shape_output(text, request)
    }
}

fn build_request_body(request: &GenerationRequest) -> GeminiRequest {
    let schema = request.schema().map(schema_to_gemini);

    GeminiRequest {
        contents: vec![GeminiContent {
            role: "user".to_string(),
            parts: vec![GeminiPart {
                text: request.prompt.clone(),
            }],
        }],
        generation_config: GeminiGenerationConfig {
            temperature: request.temperature,
            response_mime_type: schema.as_ref().map(|_| "application/json".to_string()),
            response_schema: schema,
        },
    }
}

/// Translate a JSON Schema into Gemini's OpenAPI-subset dialect
///
/// Types are upper-cased and object properties get an explicit
/// `propertyOrdering` (required keys first). Gemini does not accept
/// `additionalProperties`, so it is dropped here; extra keys are rejected
/// locally when the response is decoded.
fn schema_to_gemini(schema: &Value) -> Value {
    let Some(source) = schema.as_object() else {
        return schema.clone();
    };

    let mut out = Map::new();
    for (key, value) in source {
        match key.as_str() {
            "type" => {
                let upper = value
                    .as_str()
                    .map(|t| Value::String(t.to_uppercase()))
                    .unwrap_or_else(|| value.clone());
                out.insert("type".to_string(), upper);
            }
            "items" => {
                out.insert("items".to_string(), schema_to_gemini(value));
            }
            "properties" => {
                let props: Map<String, Value> = value
                    .as_object()
                    .map(|props| {
                        props
                            .iter()
                            .map(|(name, property)| (name.clone(), schema_to_gemini(property)))
                            .collect()
                    })
                    .unwrap_or_default();
                out.insert("propertyOrdering".to_string(), json!(property_ordering(schema, &props)));
                out.insert("properties".to_string(), Value::Object(props));
            }
            "required" | "description" | "enum" | "format" | "nullable" => {
                out.insert(key.clone(), value.clone());
            }
            _ => {}
        }
    }
    Value::Object(out)
}

fn property_ordering<'a>(schema: &'a Value, props: &'a Map<String, Value>) -> Vec<&'a str> {
    let mut ordering: Vec<&str> = schema["required"]
        .as_array()
        .map(|required| required.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    for name in props.keys() {
        if !ordering.contains(&name.as_str()) {
            ordering.push(name);
        }
    }
    ordering
}

fn parse_response_text(body: &str) -> Result<String, LlmError> {
    let response: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    if let Some(usage) = &response.usage_metadata {
        info!(
            "Gemini API usage - Prompt: {:?} tokens, Response: {:?} tokens, Total: {:?} tokens",
            usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
        );
    }

    let candidate = match response.candidates.first() {
        Some(candidate) => candidate,
        None => {
            let reason = response
                .prompt_feedback
                .and_then(|feedback| feedback.block_reason)
                .unwrap_or_else(|| "unknown".to_string());
            return Err(LlmError::InvalidResponse(format!(
                "No candidates in response (block reason: {})",
                reason
            )));
        }
    };

    let texts: Vec<&str> = candidate
        .content
        .as_ref()
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|part| part.text.as_deref())
                .collect()
        })
        .unwrap_or_default();

    if texts.is_empty() {
        return Err(LlmError::InvalidResponse(format!(
            "Candidate has no text (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        )));
    }

    Ok(texts.concat())
}
