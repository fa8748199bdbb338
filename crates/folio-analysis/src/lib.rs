//! Folio Analysis
//!
//! Populates checklist fields from a source document and extracts its
//! characters and locations, using a remote generation model.
//!
//! # Overview
//!
//! Two independent operations share one `GenerationClient`:
//!
//! - **Entity extraction**: one schema-constrained request returning
//!   `{ characters, locations }`.
//! - **Field generation**: one free-form request per checklist field, run
//!   strictly in order, reporting each field as it completes and aborting the
//!   whole run on the first failure.
//!
//! # Architecture
//!
//! ```text
//! Document + Contract + Fields → FieldOrchestrator → PromptBuilder → GenerationClient → callback
//! Document + Contract          → EntityExtractor   → GenerationClient (JSON schema)  → IdentifiedEntities
//! ```
//!
//! Run state lives in a caller-owned [`RunHandle`], never in a global.
//!
//! # Example Usage
//!
//! ```no_run
//! use folio_analysis::{
//!     AnalysisConfig, ChecklistPromptBuilder, EntityExtractor, FieldOrchestrator,
//!     FieldRunRequest, RunHandle,
//! };
//! use folio_domain::{FieldId, FieldRules};
//! use folio_llm::{GeminiConfig, GeminiProvider};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(GeminiProvider::new(GeminiConfig::from_env())?);
//! let config = AnalysisConfig::default();
//!
//! let extractor = EntityExtractor::new(Arc::clone(&client), config.clone());
//! let entities = extractor.identify_entities("document text", "contract text").await?;
//! println!("Characters: {:?}", entities.characters);
//!
//! let orchestrator = FieldOrchestrator::new(client, ChecklistPromptBuilder::new(), config);
//! let fields = vec![FieldId::from("summary"), FieldId::from("theme")];
//! let rules = FieldRules::empty();
//! let run = RunHandle::new();
//!
//! orchestrator
//!     .generate_all_fields(
//!         &run,
//!         FieldRunRequest::new("document text", &fields, "contract text", &rules),
//!         |field, content| println!("{}: {}", field, content),
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod orchestrator;
mod prompt;
mod run;


pub use config::{
    AnalysisConfig, DEFAULT_EXTRACTION_TEMPERATURE, DEFAULT_FIELD_TEMPERATURE,
    DEFAULT_MAX_DOCUMENT_CHARS,
};
pub use error::{AnalysisError, EXTRACTION_FAILED_MESSAGE};
pub use extractor::EntityExtractor;
pub use orchestrator::{FieldOrchestrator, FieldRunRequest};
pub use prompt::ChecklistPromptBuilder;
pub use run::RunHandle;
