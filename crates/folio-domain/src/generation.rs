//! Generation request and output types
//!
//! A request is either free-form (the model returns prose that can never fail
//! to parse) or structured (the model must return JSON matching a declared
//! JSON Schema). The two modes have different failure surfaces, so they
//! are distinct variants rather than optional fields.

use serde_json::Value;

/// How the model should shape its answer
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationMode {
    /// Plain text
    FreeForm,

    /// JSON matching `schema`
    Structured {
        /// Declared response shape (JSON Schema)
        schema: Value,
    },
}

/// A single call to a generation client
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Full prompt text, sent as one user turn
    pub prompt: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Free-form or schema-constrained output
    pub mode: GenerationMode,
}

impl GenerationRequest {
    /// Build a free-form text request
    pub fn free_form(prompt: impl Into<String>, temperature: f32) -> Self {
        Self {
            prompt: prompt.into(),
            temperature,
            mode: GenerationMode::FreeForm,
        }
    }

    /// Build a schema-constrained JSON request
    pub fn structured(prompt: impl Into<String>, temperature: f32, schema: Value) -> Self {
        Self {
            prompt: prompt.into(),
            temperature,
            mode: GenerationMode::Structured { schema },
        }
    }

    /// The declared schema, if this is a structured request
    pub fn schema(&self) -> Option<&Value> {
        match &self.mode {
            GenerationMode::FreeForm => None,
            GenerationMode::Structured { schema } => Some(schema),
        }
    }

    /// Whether this request expects JSON output
    pub fn is_structured(&self) -> bool {
        matches!(self.mode, GenerationMode::Structured { .. })
    }
}

/// Result of a successful generation call
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutput {
    /// Raw model text for free-form requests
    Text(String),

    /// Parsed, schema-checked JSON for structured requests
    Structured(Value),
}

impl GenerationOutput {
    /// Render the output as text
    ///
    /// Structured values are rendered as compact JSON.
    pub fn into_text(self) -> String {
        match self {
            GenerationOutput::Text(text) => text,
            GenerationOutput::Structured(value) => value.to_string(),
        }
    }
}
