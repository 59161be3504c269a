// src/rules/expression_complexity.rs
//! Expressions with too many logical operators and conditionals.
//!
//! Only root expressions are scored. An expression belongs to the count of
//! the nearest scored ancestor it reaches through other expressions,
//! compound containers (argument list, initializer) and nodes the frontend
//! has no kind for (keyword arguments, object pairs). Lambda bodies start a
//! new root.

use crate::analysis::{Classification, Registry, RuleContext};
use crate::config::RuleConfig;
use crate::error::RuleError;
use crate::tree::{Node, NodeKind};
use crate::types::{Confidence, Finding};

use super::RuleInfo;

pub const INFO: RuleInfo = RuleInfo {
    id: "expression-complexity",
    title: "Expression is too complex",
    message: "Expression complexity is {0} (Max: {1}); extract parts into named variables",
    confidence: Confidence::Info,
};

const KINDS: [NodeKind; 15] = [
    NodeKind::Binary,
    NodeKind::LogicalAnd,
    NodeKind::LogicalOr,
    NodeKind::Coalesce,
    NodeKind::Unary,
    NodeKind::Conditional,
    NodeKind::Assignment,
    NodeKind::CompoundAssignment,
    NodeKind::Invocation,
    NodeKind::MemberAccess,
    NodeKind::Index,
    NodeKind::Grouping,
    NodeKind::Initializer,
    NodeKind::Await,
    NodeKind::Cast,
];

pub fn register(registry: &mut Registry, config: &RuleConfig) {
    let classification = config.expression_classification();
    let threshold = config.max_expression_complexity;
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
    if !is_root(ctx, classification) {
        return Ok(Vec::new());
    }
    let score = ctx.scorer(classification).score(node)?;
    if score.total <= threshold {
        return Ok(Vec::new());
    }
    Ok(vec![Finding::new(INFO.id, node.span())
        .with_arg(score.total.to_string())
        .with_arg(threshold.to_string())])
}

fn is_root(ctx: &RuleContext<'_>, classification: &Classification) -> bool {
    for ancestor in ctx.ancestors().iter().rev() {
        let kind = ancestor.kind();
        if kind.is_boundary() {
            return true;
        }
        if KINDS.contains(&kind) {
            return false;
        }
        let transparent = matches!(kind, NodeKind::Unknown(_))
            || kind.is_expression()
            || classification.is_compound(kind);
        if !transparent {
            return true;
        }
    }
    true
}
