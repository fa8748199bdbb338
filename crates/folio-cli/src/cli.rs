//! CLI command definitions and argument parsing.

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Folio CLI - Fill checklist fields and extract entities from a source document.
#[derive(Debug, Parser)]
#[command(name = "folio")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Model identifier (overrides the config file)
    #[arg(short, long, global = true, env = "FOLIO_MODEL")]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (content only)
    Quiet,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => OutputFormat::Table,
            CliFormat::Json => OutputFormat::Json,
            CliFormat::Quiet => OutputFormat::Quiet,
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Identify characters and locations in a document
    Entities(EntitiesArgs),

    /// Generate content for every listed checklist field
    Fields(FieldsArgs),

    /// Print the effective configuration (API key omitted)
    Config,
}

/// Arguments for the entities command.
#[derive(Debug, Parser)]
pub struct EntitiesArgs {
    /// Source document (text file)
    #[arg(short, long)]
    pub document: PathBuf,

    /// Contract / canon text file
    #[arg(long)]
    pub contract: PathBuf,
}

/// Arguments for the fields command.
#[derive(Debug, Parser)]
pub struct FieldsArgs {
    /// Source document (text file)
    #[arg(short, long)]
    pub document: PathBuf,

    /// Contract / canon text file
    #[arg(long)]
    pub contract: PathBuf,

    /// Field list: one field identifier per line, `#` starts a comment
    #[arg(long)]
    pub fields: PathBuf,

    /// Field rules (JSON object keyed by field identifier)
    #[arg(short, long)]
    pub rules: Option<PathBuf>,
}
