//! Configuration for the Gemini provider

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Primary environment variable holding the API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Fallback environment variable holding the API key
pub const FALLBACK_API_KEY_ENV: &str = "API_KEY";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default Gemini API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default timeout for a single HTTP request (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Configuration for [`GeminiProvider`](crate::GeminiProvider)
///
/// The API key is never written back out by [`GeminiConfig::to_toml`] and is
/// redacted from `Debug` output.
#[derive(Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key; `None` means the provider is unconfigured
    ///
    /// Only ever set from the environment or in code, never from a file.
    #[serde(skip)]
    pub api_key: Option<String>,

    /// Model identifier (e.g., "gemini-2.5-flash")
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts per request, including the first
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            endpoint: default_endpoint(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl GeminiConfig {
    /// Default configuration with the API key taken from the environment
    pub fn from_env() -> Self {
        Self::default().with_env_key()
    }

    /// Fill in the API key from the environment unless one is already set
    pub fn with_env_key(mut self) -> Self {
        if self.api_key.is_none() {
            self.api_key = read_env_key();
        }
        self
    }

    /// Set the API key explicitly
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Whether a non-empty API key is present
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }

    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.endpoint.trim().is_empty() {
            return Err("endpoint must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.max_retries == 0 {
            return Err("max_retries must be greater than 0".to_string());
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

fn read_env_key() -> Option<String> {
    [API_KEY_ENV, FALLBACK_API_KEY_ENV]
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GeminiConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_blank_key_is_not_a_key() {
        let config = GeminiConfig::default().with_api_key("   ");
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_explicit_key_is_kept_over_env() {
        let config = GeminiConfig::default().with_api_key("explicit").with_env_key();
        assert_eq!(config.api_key.as_deref(), Some("explicit"));
    }

    #[test]
    fn test_invalid_values() {
        let mut config = GeminiConfig::default();
        config.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = GeminiConfig::default();
        config.max_retries = 0;
        assert!(config.validate().is_err());

        let config = GeminiConfig::default().with_model("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_partial_toml_uses_defaults() {
        let config = GeminiConfig::from_toml(r#"model = "gemini-2.5-pro""#).unwrap();
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_api_key_ignored_in_toml() {
        let config = GeminiConfig::from_toml(
            r#"
            api_key = "from-file"
            model = "gemini-2.5-pro"
            "#,
        )
        .unwrap();
        assert!(config.api_key.is_none());
        assert!(!config.has_api_key());
        assert_eq!(config.model, "gemini-2.5-pro");
    }

    #[test]
    fn test_api_key_never_serialized() {
        let config = GeminiConfig::default().with_api_key("secret-key");
        let toml_str = config.to_toml().unwrap();
        assert!(!toml_str.contains("secret-key"));
        assert!(!format!("{:?}", config).contains("secret-key"));
    }
}
