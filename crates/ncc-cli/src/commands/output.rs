//! Report rendering.

use anyhow::{Context, Result};
use ncc_core::AnalysisReport;
use std::io::Write;
use std::path::Path;

use crate::OutputFormat;

/// Renders a report in the requested format.
pub fn render(report: &AnalysisReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(report.format_text()),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(report)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Writes rendered output to `path`, or to stdout.
pub fn emit(rendered: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("Failed to write report to {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

/// Lists files that were skipped on stderr.
pub fn print_parse_failures(report: &AnalysisReport) {
    if report.parse_failures.is_empty() {
        return;
    }
    eprintln!(
        "{} file(s) could not be parsed and were skipped:",
        report.parse_failures.len()
    );
    for failure in &report.parse_failures {
        eprintln!("  {failure}");
    }
}
