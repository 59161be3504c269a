// src/rules/identical_branches.rs
//! `if` statements whose `then` and final `else` branches are identical.
//!
//! Only a terminal `else` is compared; `else if` arms are handled by
//! [`duplicate_condition`](super::duplicate_condition). Two empty branches
//! are left alone (placeholder code).

use crate::analysis::{Registry, RuleContext};
use crate::config::RuleConfig;
use crate::error::RuleError;
use crate::tree::{Node, NodeKind};
use crate::types::{Confidence, Finding};

use super::RuleInfo;

pub const INFO: RuleInfo = RuleInfo {
    id: "identical-branches",
    title: "Both branches of an if statement are identical",
    message: "The 'then' and 'else' branches of this if are identical",
    confidence: Confidence::High,
};

pub fn register(registry: &mut Registry, _config: &RuleConfig) {
    registry.register(INFO.id, [NodeKind::If], check);
}

/// # Errors
/// Propagates [`RuleError::TooComplex`] from the equivalence check.
pub fn check(node: &Node, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, RuleError> {
    let [_, then, otherwise] = node.children() else {
        return Ok(Vec::new());
    };
    if otherwise.kind() == NodeKind::If || then.is_leaf() {
        return Ok(Vec::new());
    }
    if ctx.equivalence().check(then, otherwise)? {
        return Ok(vec![Finding::new(INFO.id, node.span())]);
    }
    Ok(Vec::new())
}
