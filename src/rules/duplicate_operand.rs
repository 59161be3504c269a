// src/rules/duplicate_operand.rs
//! Binary operations whose two operands are the same expression.
//!
//! `a - a`, `x == x`, `done && done`: the result is a constant or one of
//! the operands, which usually means one side was meant to be something
//! else. Arithmetic where repetition is meaningful (`+`, `*`, shifts) is not
//! reported, and neither are operands containing calls, since two calls can
//! yield different values.

use crate::analysis::{Registry, RuleContext};
use crate::config::RuleConfig;
use crate::error::RuleError;
use crate::tree::{Node, NodeKind};
use crate::types::{Confidence, Finding};

use super::RuleInfo;

pub const INFO: RuleInfo = RuleInfo {
    id: "duplicate-operand",
    title: "Identical expressions on both sides of a binary operator",
    message: "Identical sub-expressions on both sides of operator '{0}'",
    confidence: Confidence::High,
};

const KINDS: [NodeKind; 4] = [
    NodeKind::Binary,
    NodeKind::LogicalAnd,
    NodeKind::LogicalOr,
    NodeKind::Coalesce,
];

const SUSPICIOUS: &[&str] = &[
    "-", "/", "%", "^", "&", "|", "==", "!=", "===", "!==", "<", "<=", ">", ">=", "&&", "||",
    "and", "or", "??", "is", "is not",
];

pub fn register(registry: &mut Registry, _config: &RuleConfig) {
    registry.register(INFO.id, KINDS, check);
}

/// # Errors
/// Propagates [`RuleError::TooComplex`] from the equivalence check.
pub fn check(node: &Node, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, RuleError> {
    let Some(operator) = node.operator() else {
        return Ok(Vec::new());
    };
    let Some(symbol) = operator.text().filter(|t| SUSPICIOUS.contains(t)) else {
        return Ok(Vec::new());
    };
    let Some((left, right)) = node.operands() else {
        return Ok(Vec::new());
    };
    if left.contains_kind(NodeKind::Invocation) {
        return Ok(Vec::new());
    }

    if ctx.equivalence().check(left, right)? {
        return Ok(vec![Finding::new(INFO.id, operator.span()).with_arg(symbol)]);
    }
    Ok(Vec::new())
}
