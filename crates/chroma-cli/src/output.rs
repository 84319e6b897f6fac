//! Output formatting utilities for CLI commands.

use serde::Serialize;

use crate::cli::{CommandContext, OutputFormat};
use crate::error::CliError;

pub mod progress;

/// Status icons
pub struct Icons;

impl Icons {
    pub const CHECK: &'static str = "✓";
    pub const CROSS: &'static str = "✗";
    pub const WARNING: &'static str = "⚠";
    pub const ARROW: &'static str = "→";
}

/// Trait for types that can be formatted for output
pub trait FormattedOutput {
    fn format_text(&self) -> String;

    fn format_json(&self) -> Result<String, serde_json::Error>
    where
        Self: Serialize,
    {
        serde_json::to_string_pretty(self)
    }
}

/// Print formatted output to stdout
pub fn print_output<T>(ctx: &CommandContext, value: &T) -> Result<(), CliError>
where
    T: FormattedOutput + Serialize,
{
    let output = match ctx.format {
        OutputFormat::Text => {
            if ctx.quiet {
                return Ok(());
            }
            value.format_text()
        }
        OutputFormat::Json => value
            .format_json()
            .map_err(|e| CliError::Other(anyhow::anyhow!("JSON serialization failed: {e}")))?,
    };

    println!("{output}");
    Ok(())
}
