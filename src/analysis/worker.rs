//! Worker module for file parsing and analysis.

use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::config::RuleConfig;
use crate::error::SondeError;
use crate::frontend;
use crate::lang::Lang;
use crate::rules;
use crate::semantic::SourceModel;
use crate::types::{Confidence, FileReport, Finding, Violation};

use super::dispatch::{Dispatcher, Registry};

/// Reads, parses and checks one file. Never fails: problems become notes on
/// the returned report.
#[must_use]
pub fn scan_file(path: &Path, registry: &Registry, rules: &RuleConfig) -> FileReport {
    let mut report = FileReport::new(path.to_path_buf());

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "unreadable file");
            report.notes.push(format!("unreadable: {e}"));
            return report;
        }
    };

    let Some(lang) = Lang::from_path(path) else {
        let e = SondeError::UnsupportedLanguage(path.to_path_buf());
        tracing::debug!(error = %e, "skipped");
        report.notes.push(e.to_string());
        return report;
    };

    analyze(lang, &source, registry, rules, &mut report);
    report
}

/// Checks an in-memory buffer. `path` only labels the report.
#[must_use]
pub fn scan_source(
    path: &Path,
    lang: Lang,
    source: &str,
    registry: &Registry,
    rules: &RuleConfig,
) -> FileReport {
    let mut report = FileReport::new(path.to_path_buf());
    analyze(lang, source, registry, rules, &mut report);
    report
}

fn analyze(lang: Lang, source: &str, registry: &Registry, rules: &RuleConfig, report: &mut FileReport) {
    let started = Instant::now();

    let unit = match frontend::load(lang, source, rules.max_depth) {
        Ok(unit) => unit,
        Err(e) => {
            tracing::warn!(path = %report.path.display(), error = %e, "parse failed");
            report.notes.push(e.to_string());
            return;
        }
    };
    if unit.syntax_errors > 0 {
        report.notes.push(format!(
            "{} syntax error(s); affected regions were skipped",
            unit.syntax_errors
        ));
    }
    if unit.truncated > 0 {
        tracing::warn!(path = %report.path.display(), subtrees = unit.truncated, "nesting too deep, truncated");
        report.notes.push(format!(
            "{} subtree(s) nested deeper than {} were not analyzed",
            unit.truncated, rules.max_depth
        ));
    }

    let deadline = (rules.file_timeout_ms > 0)
        .then(|| started + Duration::from_millis(rules.file_timeout_ms));
    let model = SourceModel::new(source);
    let out = Dispatcher::new(registry)
        .with_limits(rules.limits())
        .run_until(&unit.root, &model, || {
            deadline.is_some_and(|limit| Instant::now() >= limit)
        });
    if !out.completed {
        tracing::warn!(path = %report.path.display(), visited = out.visited, "file deadline reached");
        report.notes.push(format!(
            "stopped after {} ms; results are partial",
            rules.file_timeout_ms
        ));
    }

    let lines = LineIndex::new(source);
    report.violations = out.findings.iter().map(|f| render(f, &lines)).collect();
    report.failures = out.failures;
    report.nodes_visited = out.visited;

    tracing::debug!(
        path = %report.path.display(),
        lang = lang.name(),
        violations = report.violations.len(),
        failures = report.failures.len(),
        visited = report.nodes_visited,
        elapsed_ms = started.elapsed().as_millis(),
        "file analyzed"
    );
}

fn render(finding: &Finding, lines: &LineIndex) -> Violation {
    let (row, column) = lines.position(finding.span.start);
    let (message, confidence) = match rules::info(finding.rule) {
        Some(info) => (info.render(&finding.args), info.confidence),
        None => (finding.args.join(", "), Confidence::Medium),
    };
    Violation {
        row,
        column,
        span: finding.span,
        rule: finding.rule,
        message,
        confidence,
        args: finding.args.clone(),
    }
}

/// Byte offset to 1-based line and column.
pub struct LineIndex<'s> {
    source: &'s str,
    starts: Vec<usize>,
}

impl<'s> LineIndex<'s> {
    #[must_use]
    pub fn new(source: &'s str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { source, starts }
    }

    /// Columns count characters, not bytes.
    #[must_use]
    pub fn position(&self, offset: usize) -> (usize, usize) {
        let line = match self.starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let start = self.starts.get(line).copied().unwrap_or(0);
        let column = self
            .source
            .get(start..offset)
            .map_or(offset.saturating_sub(start), |s| s.chars().count());
        (line + 1, column + 1)
    }
}
