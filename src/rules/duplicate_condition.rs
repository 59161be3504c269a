// src/rules/duplicate_condition.rs
//! Repeated conditions in an `if` / `else if` chain.
//!
//! A condition equivalent to an earlier one in the same chain can never be
//! the first to hold, so its branch is dead code.

use crate::analysis::{Registry, RuleContext};
use crate::config::RuleConfig;
use crate::error::RuleError;
use crate::tree::{Node, NodeKind};
use crate::types::{Confidence, Finding};

use super::RuleInfo;

pub const INFO: RuleInfo = RuleInfo {
    id: "duplicate-condition",
    title: "Condition repeats an earlier condition of the same if chain",
    message: "Condition '{0}' was already tested earlier in this chain; this branch is unreachable",
    confidence: Confidence::High,
};

pub fn register(registry: &mut Registry, _config: &RuleConfig) {
    registry.register(INFO.id, [NodeKind::If], check);
}

/// Runs once per chain, from its head.
///
/// # Errors
/// Propagates [`RuleError::TooComplex`] from the equivalence check.
pub fn check(node: &Node, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, RuleError> {
    if super::is_else_if(node, ctx) {
        return Ok(Vec::new());
    }

    let checker = ctx.equivalence();
    let mut seen: Vec<&Node> = Vec::new();
    let mut findings = Vec::new();
    let mut current = Some(node);

    while let Some(link) = current {
        let Some(condition) = link.child(0) else { break };
        let mut repeated = false;
        for earlier in &seen {
            if checker.check(earlier, condition)? {
                repeated = true;
                break;
            }
        }
        if repeated {
            let text = super::snippet(condition.ungrouped(), ctx);
            findings.push(Finding::new(INFO.id, condition.span()).with_arg(text));
        } else {
            seen.push(condition);
        }
        current = link.child(2).filter(|alt| alt.kind() == NodeKind::If);
    }

    Ok(findings)
}
