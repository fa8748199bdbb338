//! Configuration for extraction and field generation

use serde::{Deserialize, Serialize};

/// Default maximum document prefix sent for entity extraction (characters)
pub const DEFAULT_MAX_DOCUMENT_CHARS: usize = 50_000;

/// Default temperature for entity extraction
pub const DEFAULT_EXTRACTION_TEMPERATURE: f32 = 0.1;

/// Default temperature for field generation
pub const DEFAULT_FIELD_TEMPERATURE: f32 = 0.2;

/// Configuration for the analysis pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Documents are truncated to this many characters before extraction
    #[serde(default = "default_max_document_chars")]
    pub max_document_chars: usize,

    /// Low temperature biases extraction toward literal names
    #[serde(default = "default_extraction_temperature")]
    pub extraction_temperature: f32,

    /// Temperature for generative field prose
    #[serde(default = "default_field_temperature")]
    pub field_temperature: f32,
}

fn default_max_document_chars() -> usize {
    DEFAULT_MAX_DOCUMENT_CHARS
}

fn default_extraction_temperature() -> f32 {
    DEFAULT_EXTRACTION_TEMPERATURE
}

fn default_field_temperature() -> f32 {
    DEFAULT_FIELD_TEMPERATURE
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_document_chars: DEFAULT_MAX_DOCUMENT_CHARS,
            extraction_temperature: DEFAULT_EXTRACTION_TEMPERATURE,
            field_temperature: DEFAULT_FIELD_TEMPERATURE,
        }
    }
}

impl AnalysisConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_document_chars == 0 {
            return Err("max_document_chars must be greater than 0".to_string());
        }
        for (name, value) in [
            ("extraction_temperature", self.extraction_temperature),
            ("field_temperature", self.field_temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                return Err(format!("{} {} out of range [0.0, 2.0]", name, value));
            }
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
