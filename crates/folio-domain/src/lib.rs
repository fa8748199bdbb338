//! Folio Domain Layer
//!
//! This crate contains the data model and capability traits shared by every
//! other Folio crate. It holds no I/O and no provider logic.
//!
//! ## Key Concepts
//!
//! - **Field**: One named unit of checklist content, identified by an opaque path
//! - **Contract**: Authoritative canon text embedded in every prompt
//! - **Entities**: Characters and locations extracted from a source document
//! - **Run State**: Observable progress of a single field-generation run
//! - **Generation Request**: Free-form or schema-constrained call to a model
//!
//! ## Architecture
//!
//! - Pure data and validation logic only
//! - Provider implementations live in `folio-llm`
//! - Orchestration lives in `folio-analysis`
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entities;
pub mod field;
pub mod generation;
pub mod run;
pub mod schema;
pub mod text;
pub mod traits;

// Re-exports for convenience
pub use entities::IdentifiedEntities;
pub use field::{FieldId, FieldRules};
pub use generation::{GenerationMode, GenerationOutput, GenerationRequest};
pub use run::{RunId, RunState};
pub use text::truncate_chars;
