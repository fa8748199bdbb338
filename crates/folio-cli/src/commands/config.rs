//! Config command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the config command.
pub fn execute_config(config: &Config, formatter: &Formatter) -> Result<()> {
    let key_status = if config.gemini.has_api_key() {
        formatter.success("API key found in environment")
    } else {
        formatter.warning("No API key set (GEMINI_API_KEY or API_KEY)")
    };
    eprintln!("{}", key_status);

    println!("{}", config.to_toml()?);
    Ok(())
}
