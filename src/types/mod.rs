// src/types/mod.rs
use serde::Serialize;
use std::path::PathBuf;

use crate::analysis::PredicateFailure;
use crate::tree::Span;

mod finding;
pub use finding::Finding;

/// How certain a rule is that a finding is a real problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Confidence {
    /// Style observation. Not wrong, but could be improved.
    Info,
    /// Suspicious pattern that may be intentional.
    Medium,
    /// Almost certainly a bug.
    High,
}

impl Confidence {
    /// Label shown in the report output.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "Fix required",
            Self::Medium => "Review recommended",
            Self::Info => "Style suggestion",
        }
    }

    /// Prefix word for the report line (error/warn/info).
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::High => "error",
            Self::Medium => "warn",
            Self::Info => "info",
        }
    }
}

/// A finding rendered for reporting: located by line and column, with its
/// message interpolated.
#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    pub row: usize,
    pub column: usize,
    pub span: Span,
    pub rule: &'static str,
    pub message: String,
    pub confidence: Confidence,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

/// Analysis results for a single file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub violations: Vec<Violation>,
    /// Checks that could not complete on this file.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<PredicateFailure>,
    /// File-level problems (unreadable, unparsable, truncated, timed out).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    pub nodes_visited: usize,
}

impl FileReport {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            violations: Vec::new(),
            failures: Vec::new(),
            notes: Vec::new(),
            nodes_visited: 0,
        }
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }
}

/// Aggregated results from scanning multiple files.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub files: Vec<FileReport>,
    pub total_violations: usize,
    pub total_failures: usize,
    pub duration_ms: u128,
}

impl ScanReport {
    #[must_use]
    pub fn from_files(files: Vec<FileReport>, duration_ms: u128) -> Self {
        Self {
            total_violations: files.iter().map(|f| f.violations.len()).sum(),
            total_failures: files.iter().map(|f| f.failures.len()).sum(),
            files,
            duration_ms,
        }
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.total_violations > 0
    }

    /// Count of violations at HIGH confidence.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.count_at(Confidence::High)
    }

    /// Count of violations at MEDIUM confidence.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.count_at(Confidence::Medium)
    }

    /// Count of violations at INFO confidence.
    #[must_use]
    pub fn suggestion_count(&self) -> usize {
        self.count_at(Confidence::Info)
    }

    fn count_at(&self, level: Confidence) -> usize {
        self.files
            .iter()
            .flat_map(|f| &f.violations)
            .filter(|v| v.confidence == level)
            .count()
    }

    #[must_use]
    pub fn clean_file_count(&self) -> usize {
        self.files.iter().filter(|f| f.is_clean()).count()
    }
}
