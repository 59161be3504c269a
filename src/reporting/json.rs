use anyhow::Result;
use serde::Serialize;

use crate::types::{FileReport, ScanReport};

#[derive(Serialize)]
struct JsonSummary {
    files: usize,
    violations: usize,
    errors: usize,
    warnings: usize,
    suggestions: usize,
    failures: usize,
    duration_ms: u128,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: JsonSummary,
    files: &'a [FileReport],
}

/// Renders the report as pretty-printed JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn to_json(report: &ScanReport) -> Result<String> {
    let doc = JsonReport {
        summary: JsonSummary {
            files: report.files.len(),
            violations: report.total_violations,
            errors: report.error_count(),
            warnings: report.warning_count(),
            suggestions: report.suggestion_count(),
            failures: report.total_failures,
            duration_ms: report.duration_ms,
        },
        files: &report.files,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Prints the report as JSON to stdout.
///
/// # Errors
/// Returns error if serialization fails.
pub fn print_report(report: &ScanReport) -> Result<()> {
    println!("{}", to_json(report)?);
    Ok(())
}
