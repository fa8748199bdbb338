//! Fields command implementation.

use crate::cli::FieldsArgs;
use crate::error::Result;
use crate::input;
use crate::output::Formatter;
use folio_analysis::{
    AnalysisConfig, ChecklistPromptBuilder, FieldOrchestrator, FieldRunRequest, RunHandle,
};
use folio_domain::traits::GenerationClient;
use folio_domain::FieldRules;
use std::sync::Arc;
use tracing::debug;

/// Execute the fields command.
///
/// Each field is printed to stdout as soon as it is generated; progress and
/// the stop summary go to stderr.
pub async fn execute_fields<C: GenerationClient>(
    args: FieldsArgs,
    client: Arc<C>,
    config: &AnalysisConfig,
    formatter: &Formatter,
) -> Result<()> {
    let document = input::read_text(&args.document)?;
    let contract = input::read_text(&args.contract)?;
    let field_ids = input::read_field_list(&args.fields)?;
    let rules = match &args.rules {
        Some(path) => input::read_rules(path)?,
        None => FieldRules::empty(),
    };

    let total = field_ids.len();
    debug!(
        "Loaded {} field(s) from {}",
        total,
        args.fields.display()
    );
    if total == 0 {
        eprintln!("{}", formatter.warning("Field list is empty, nothing to generate"));
    } else {
        eprintln!("{}", formatter.info(&format!("Generating {} field(s)", total)));
    }

    let orchestrator = FieldOrchestrator::new(client, ChecklistPromptBuilder::new(), config.clone());
    let run = RunHandle::new();
    let request = FieldRunRequest::new(&document, &field_ids, &contract, &rules);

    let mut print_error = None;
    let result = orchestrator
        .generate_all_fields(&run, request, |field, content| {
            match formatter.format_field(field, content) {
                Ok(line) => println!("{}", line),
                Err(e) => {
                    print_error.get_or_insert(e);
                }
            }
        })
        .await;

    if let Err(e) = result {
        eprintln!(
            "{}",
            formatter.error(&format!(
                "Stopped after {} of {} fields",
                run.completed_fields(),
                total
            ))
        );
        return Err(e.into());
    }
    if let Some(e) = print_error {
        return Err(e);
    }

    eprintln!(
        "{}",
        formatter.success(&format!("Generated {} field(s)", run.completed_fields()))
    );
    Ok(())
}
