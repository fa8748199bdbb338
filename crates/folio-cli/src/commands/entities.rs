//! Entities command implementation.

use crate::cli::EntitiesArgs;
use crate::error::Result;
use crate::input;
use crate::output::Formatter;
use folio_analysis::{AnalysisConfig, EntityExtractor};
use folio_domain::traits::GenerationClient;
use std::sync::Arc;
use tracing::debug;

/// Execute the entities command.
pub async fn execute_entities<C: GenerationClient>(
    args: EntitiesArgs,
    client: Arc<C>,
    config: &AnalysisConfig,
    formatter: &Formatter,
) -> Result<()> {
    let document = input::read_text(&args.document)?;
    let contract = input::read_text(&args.contract)?;
    debug!(
        "Read document ({} chars) and contract ({} chars)",
        document.chars().count(),
        contract.chars().count()
    );

    let extractor = EntityExtractor::new(client, config.clone());
    let entities = extractor.identify_entities(&document, &contract).await?;

    println!("{}", formatter.format_entities(&entities)?);
    Ok(())
}
