// src/reporting/mod.rs
//! Scan report output: colored console text or JSON.

pub mod console;
pub mod json;

use anyhow::Result;
use clap::ValueEnum;

use crate::types::ScanReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Prints `report` to stdout in the requested format.
///
/// # Errors
/// Returns error if writing or serialization fails.
pub fn print_report(report: &ScanReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => console::print_report(report),
        OutputFormat::Json => json::print_report(report),
    }
}
