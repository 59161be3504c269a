//! Findings produced by rule predicates.

use serde::Serialize;

use crate::tree::Span;

/// One rule violation as produced by the core: rule identity, primary span
/// and message arguments. Rendering is left to reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    #[serde(rename = "rule_id")]
    pub rule: &'static str,
    pub span: Span,
    pub args: Vec<String>,
}

impl Finding {
    #[must_use]
    pub fn new(rule: &'static str, span: Span) -> Self {
        Self {
            rule,
            span,
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}
