//! Folio CLI - Fill checklist fields and extract entities from a source document.

use clap::Parser;
use folio_cli::commands;
use folio_cli::{Cli, Command, Config, Formatter};
use folio_llm::GeminiProvider;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize tracing (log to stderr, stdout carries results)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> folio_cli::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(model) = cli.model {
        config.gemini = config.gemini.with_model(model);
    }
    config.gemini = config.gemini.with_env_key();
    config.validate()?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Config => {
            commands::execute_config(&config, &formatter)?;
        }
        Command::Entities(args) => {
            let client = Arc::new(GeminiProvider::new(config.gemini.clone())?);
            commands::execute_entities(args, client, &config.analysis, &formatter).await?;
        }
        Command::Fields(args) => {
            let client = Arc::new(GeminiProvider::new(config.gemini.clone())?);
            commands::execute_fields(args, client, &config.analysis, &formatter).await?;
        }
    }

    Ok(())
}
