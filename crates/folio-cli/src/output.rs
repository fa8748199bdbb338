//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use folio_domain::{FieldId, IdentifiedEntities};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format identified entities.
    pub fn format_entities(&self, entities: &IdentifiedEntities) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(entities)?),
            OutputFormat::Table => Ok(self.format_entities_table(entities)),
            OutputFormat::Quiet => Ok(Self::format_entities_quiet(entities)),
        }
    }

    fn format_entities_table(&self, entities: &IdentifiedEntities) -> String {
        if entities.is_empty() {
            return self.colorize("No characters or locations found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Kind", "Name"]);

        for name in &entities.characters {
            builder.push_record(["character", name.as_str()]);
        }
        for name in &entities.locations {
            builder.push_record(["location", name.as_str()]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// One name per line, characters first.
    fn format_entities_quiet(entities: &IdentifiedEntities) -> String {
        entities
            .characters
            .iter()
            .chain(entities.locations.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format one generated field.
    ///
    /// JSON output is a single line per field so a stream of fields can be
    /// consumed line by line.
    pub fn format_field(&self, field: &FieldId, content: &str) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string(&serde_json::json!({
                "field": field.as_str(),
                "content": content,
            }))?),
            OutputFormat::Table => Ok(format!(
                "{}\n{}\n",
                self.colorize(field.as_str(), "cyan"),
                content
            )),
            OutputFormat::Quiet => Ok(content.to_string()),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
