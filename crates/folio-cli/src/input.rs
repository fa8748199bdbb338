//! Loading of documents, field lists and rules from disk.

use crate::error::{CliError, Result};
use folio_domain::{FieldId, FieldRules};
use std::fs;
use std::path::Path;

/// Read a whole text file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| CliError::ReadInput {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a field list: one identifier per line.
///
/// Surrounding whitespace is trimmed; blank lines and lines starting with `#`
/// are skipped. Order is preserved.
pub fn read_field_list(path: &Path) -> Result<Vec<FieldId>> {
    Ok(parse_field_list(&read_text(path)?))
}

/// Parse a field list from text.
pub fn parse_field_list(contents: &str) -> Vec<FieldId> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(FieldId::from)
        .collect()
}

/// Read field rules from a JSON file.
pub fn read_rules(path: &Path) -> Result<FieldRules> {
    let contents = read_text(path)?;
    let value: serde_json::Value = serde_json::from_str(&contents).map_err(|e| {
        CliError::InvalidInput(format!("{} is not valid JSON: {}", path.display(), e))
    })?;
    Ok(FieldRules::new(value))
}
