use crate::types::{Confidence, FileReport, ScanReport, Violation};
use anyhow::Result;
use colored::Colorize;
use std::fs;
use std::io::{self, Write};
use std::time::Duration;

/// Prints a formatted scan report to stdout, grouped per file.
///
/// # Errors
/// Returns error if writing to stdout fails.
pub fn print_report(report: &ScanReport) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, report)?;
    Ok(())
}

/// Writes the report to any sink.
///
/// # Errors
/// Returns error if the sink fails.
pub fn write_report<W: Write>(out: &mut W, report: &ScanReport) -> io::Result<()> {
    for file in &report.files {
        write_file(out, file)?;
    }
    write_summary(out, report)
}

fn write_file<W: Write>(out: &mut W, file: &FileReport) -> io::Result<()> {
    if file.violations.is_empty() && file.failures.is_empty() && file.notes.is_empty() {
        return Ok(());
    }
    let source = fs::read_to_string(&file.path).ok();

    for v in &file.violations {
        write_violation(out, file, v, source.as_deref())?;
    }
    for failure in &file.failures {
        writeln!(
            out,
            "{} {}: {} {} ({} at {})",
            "note:".dimmed(),
            file.path.display(),
            failure.rule.yellow(),
            failure.message.dimmed(),
            failure.kind,
            failure.span
        )?;
    }
    for note in &file.notes {
        writeln!(out, "{} {}: {}", "note:".dimmed(), file.path.display(), note.dimmed())?;
    }
    writeln!(out)
}

fn write_violation<W: Write>(
    out: &mut W,
    file: &FileReport,
    v: &Violation,
    source: Option<&str>,
) -> io::Result<()> {
    let header = format!("{}: {}", v.confidence.prefix(), v.message);
    match v.confidence {
        Confidence::High => writeln!(out, "{}", header.red().bold())?,
        Confidence::Medium => writeln!(out, "{}", header.yellow())?,
        Confidence::Info => writeln!(out, "{}", header.dimmed())?,
    }
    writeln!(
        out,
        "  {} {}:{}:{}",
        "-->".blue(),
        file.path.display(),
        v.row,
        v.column
    )?;
    if let Some(source) = source {
        write_snippet(out, source, v)?;
    }
    writeln!(
        out,
        "   {} {}: {}",
        "=".blue(),
        v.rule.yellow(),
        v.confidence.label()
    )
}

/// The offending line with the span underlined. Spans running past the
/// line end are cut at the line end.
fn write_snippet<W: Write>(out: &mut W, source: &str, v: &Violation) -> io::Result<()> {
    let Some(line) = source.lines().nth(v.row.saturating_sub(1)) else {
        return Ok(());
    };
    let column = v.column.saturating_sub(1);
    let line_chars = line.chars().count();
    let span_chars = source
        .get(v.span.start..v.span.end)
        .map_or(1, |s| s.lines().next().map_or(1, |l| l.chars().count()));
    let width = span_chars.min(line_chars.saturating_sub(column)).max(1);

    let gutter = format!("{:3} |", v.row);
    writeln!(out, "   {}", "|".blue())?;
    writeln!(out, "   {} {}", gutter.blue(), line)?;
    writeln!(
        out,
        "   {} {}{}",
        "|".blue(),
        " ".repeat(column + 4),
        "^".repeat(width).red().bold()
    )
}

fn write_summary<W: Write>(out: &mut W, report: &ScanReport) -> io::Result<()> {
    let duration = Duration::from_millis(u64::try_from(report.duration_ms).unwrap_or(u64::MAX));
    let files = report.files.len();

    let errors = report.error_count();
    let warnings = report.warning_count();
    let suggestions = report.suggestion_count();

    if errors == 0 && warnings == 0 && suggestions == 0 {
        return writeln!(
            out,
            "{} No violations found in {files} {} ({duration:?}).",
            "OK".green().bold(),
            pluralize("file", files)
        );
    }

    let mut parts: Vec<String> = Vec::new();
    if errors > 0 {
        parts.push(format!("{} {}", errors, pluralize("error", errors)));
    }
    if warnings > 0 {
        parts.push(format!("{} {}", warnings, pluralize("warning", warnings)));
    }
    if suggestions > 0 {
        parts.push(format!(
            "{} {}",
            suggestions,
            pluralize("suggestion", suggestions)
        ));
    }
    let summary = parts.join(", ");

    if errors > 0 {
        writeln!(out, "{} sonde found {summary} ({duration:?}).", "X".red().bold())
    } else {
        writeln!(out, "{} sonde found {summary} ({duration:?}).", "~".yellow().bold())
    }
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
