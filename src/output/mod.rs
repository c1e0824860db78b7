mod cli;
mod sarif;

pub use cli::print_cli_table;
pub use sarif::print_sarif;

use crate::model::CheckResult;
use anyhow::Result;
use std::path::Path;

/// Output format for audit results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table format
    Table,
    /// JSON format for programmatic use
    Json,
    /// SARIF format for code scanning annotations
    Sarif,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "sarif" => Ok(OutputFormat::Sarif),
            _ => Err(format!(
                "Unknown format: {}. Use 'table', 'json', or 'sarif'",
                s
            )),
        }
    }
}

pub fn print_json(result: &CheckResult) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}

pub fn print_result(result: &CheckResult, lockfile: &Path, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_cli_table(result, lockfile),
        OutputFormat::Json => print_json(result),
        OutputFormat::Sarif => print_sarif(result, lockfile),
    }
}

/// Format result to string for file output
pub fn format_result_to_string(
    result: &CheckResult,
    lockfile: &Path,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Sarif => sarif::generate_sarif_string(result, lockfile),
        // Tables go to files as JSON.
        OutputFormat::Json | OutputFormat::Table => Ok(serde_json::to_string_pretty(result)?),
    }
}
