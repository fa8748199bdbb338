//! Error types for analysis operations

use folio_domain::FieldId;
use thiserror::Error;

/// Fixed, caller-facing message for every entity extraction failure
pub const EXTRACTION_FAILED_MESSAGE: &str =
    "Failed to identify characters and locations from the document.";

/// Errors that can occur during entity extraction or field generation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// No credential configured; raised before any request
    #[error("Generation client is not configured: API key is missing.")]
    MissingConfiguration,

    /// Entity extraction failed (transport, parse or schema)
    ///
    /// The underlying cause is logged, never carried.
    #[error("{}", EXTRACTION_FAILED_MESSAGE)]
    ExtractionFailed,

    /// Generation of one checklist field failed and the run was aborted
    #[error("{message}")]
    FieldGeneration {
        /// Field whose request failed
        field: FieldId,
        /// Message naming the field and the provider error text
        message: String,
        /// Fields already delivered to the completion callback
        completed: usize,
    },
}

impl AnalysisError {
    /// Build a field failure from the underlying provider error
    ///
    /// The provider text is kept verbatim. When it is empty a generic
    /// per-field message is used instead.
    pub fn field_generation(
        field: FieldId,
        cause: &dyn std::fmt::Display,
        completed: usize,
    ) -> Self {
        let cause = cause.to_string();
        let message = if cause.trim().is_empty() {
            format!("Error on field {}.", field)
        } else {
            format!("Error on field {}: {}", field, cause)
        };

        AnalysisError::FieldGeneration {
            field,
            message,
            completed,
        }
    }

    /// The failing field, for field generation errors
    pub fn field(&self) -> Option<&FieldId> {
        match self {
            AnalysisError::FieldGeneration { field, .. } => Some(field),
            _ => None,
        }
    }
}
