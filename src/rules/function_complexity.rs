// src/rules/function_complexity.rs
//! Functions and lambdas with too many branches.

use crate::analysis::{Classification, Registry, RuleContext};
use crate::config::RuleConfig;
use crate::error::RuleError;
use crate::tree::{Node, NodeKind};
use crate::types::{Confidence, Finding};

use super::RuleInfo;

pub const INFO: RuleInfo = RuleInfo {
    id: "function-complexity",
    title: "Function is too complex",
    message: "Function '{0}' has complexity {1} (Max: {2})",
    confidence: Confidence::Medium,
};

const KINDS: [NodeKind; 4] = [
    NodeKind::Function,
    NodeKind::Method,
    NodeKind::LocalFunction,
    NodeKind::Lambda,
];

pub fn register(registry: &mut Registry, config: &RuleConfig) {
    let classification = config.function_classification();
    let threshold = config.max_function_complexity;
    registry.register(INFO.id, KINDS, move |node, ctx| {
        check(node, ctx, &classification, threshold)
    });
}

/// # Errors
/// Propagates [`RuleError::TooComplex`] from the scorer.
pub fn check(
    node: &Node,
    ctx: &RuleContext<'_>,
    classification: &Classification,
    threshold: usize,
) -> Result<Vec<Finding>, RuleError> {
    let score = ctx.scorer(classification).score(node)?;
    if score.total <= threshold {
        return Ok(Vec::new());
    }
    let name = match node.kind() {
        NodeKind::Lambda => "<lambda>",
        _ => node.first_identifier().unwrap_or("<anonymous>"),
    };
    Ok(vec![Finding::new(INFO.id, node.span())
        .with_arg(name)
        .with_arg(score.total.to_string())
        .with_arg(threshold.to_string())])
}
