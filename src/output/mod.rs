//! Output formatting for CLI results

use colored::Colorize;
use serde::Serialize;

use crate::error::Result;

pub mod json;

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - a human-readable status line
    #[default]
    Pretty,
    /// JSON format - structured for scripts
    Json,
}

/// Print the outcome of an operation: `message` for humans, `data` for
/// scripts.
pub fn print_result<T: Serialize + ?Sized>(
    format: OutputFormat,
    operation: &str,
    message: &str,
    data: &T,
) -> Result<()> {
    match format {
        OutputFormat::Pretty => println!("{} {}", "✓".green(), message),
        OutputFormat::Json => println!("{}", json::format_json(operation, data)?),
    }
    Ok(())
}
