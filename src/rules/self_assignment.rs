// src/rules/self_assignment.rs
//! Assignments of a variable to itself.
//!
//! Property targets are exempt when the semantic model knows about them:
//! their setters may run code.

use crate::analysis::{Registry, RuleContext};
use crate::config::RuleConfig;
use crate::error::RuleError;
use crate::semantic::SymbolKind;
use crate::tree::{Node, NodeKind};
use crate::types::{Confidence, Finding};

use super::RuleInfo;

pub const INFO: RuleInfo = RuleInfo {
    id: "self-assignment",
    title: "Variable assigned to itself",
    message: "'{0}' is assigned to itself",
    confidence: Confidence::Medium,
};

pub fn register(registry: &mut Registry, _config: &RuleConfig) {
    registry.register(INFO.id, [NodeKind::Assignment], check);
}

/// # Errors
/// Propagates [`RuleError::TooComplex`] from the equivalence check.
pub fn check(node: &Node, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, RuleError> {
    let Some((target, value)) = node.operands() else {
        return Ok(Vec::new());
    };
    if target.contains_kind(NodeKind::Invocation) || is_property(target.ungrouped(), ctx) {
        return Ok(Vec::new());
    }
    if !ctx.equivalence().check(target, value)? {
        return Ok(Vec::new());
    }
    let name = super::snippet(target.ungrouped(), ctx);
    Ok(vec![Finding::new(INFO.id, node.span()).with_arg(name)])
}

/// Resolves the target, or the accessed member for `a.b` targets.
fn is_property(target: &Node, ctx: &RuleContext<'_>) -> bool {
    let member = match target.kind() {
        NodeKind::MemberAccess => target.children().last().unwrap_or(target),
        _ => target,
    };
    [target, member]
        .iter()
        .filter_map(|n| ctx.resolve(n))
        .any(|symbol| symbol.kind == SymbolKind::Property)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::{binary, ident, op, run, wrap};
    use crate::semantic::{Symbol, SymbolTable};
    use crate::tree::SemanticRef;

    #[test]
    fn variable_assigned_to_itself() {
        let tree = binary(NodeKind::Assignment, ident("x", 0), op("=", 2), ident("x", 4));
        let findings = run(register, &tree, &SymbolTable::new());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].args, vec!["x".to_string()]);
    }

    #[test]
    fn member_self_assignment() {
        let member = |at| wrap(NodeKind::MemberAccess, vec![ident("self", at), ident("total", at + 5)]);
        let tree = binary(NodeKind::Assignment, member(0), op("=", 11), member(13));
        assert_eq!(run(register, &tree, &SymbolTable::new()).len(), 1);
    }

    #[test]
    fn property_setters_are_exempt() {
        let mut table = SymbolTable::new();
        table.insert(SemanticRef(7), Symbol::new("Width", SymbolKind::Property));
        let target = ident("Width", 0).with_semantic_ref(SemanticRef(7));
        let value = ident("Width", 8).with_semantic_ref(SemanticRef(7));
        let tree = binary(NodeKind::Assignment, target, op("=", 6), value);
        assert!(run(register, &tree, &table).is_empty());
    }

    #[test]
    fn compound_assignment_is_not_checked() {
        let tree = binary(NodeKind::CompoundAssignment, ident("x", 0), op("+=", 2), ident("x", 5));
        assert!(run(register, &tree, &SymbolTable::new()).is_empty());
    }

    #[test]
    fn different_target_is_fine() {
        let tree = binary(NodeKind::Assignment, ident("x", 0), op("=", 2), ident("y", 4));
        assert!(run(register, &tree, &SymbolTable::new()).is_empty());
    }
}
