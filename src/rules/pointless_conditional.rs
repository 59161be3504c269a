// src/rules/pointless_conditional.rs
//! Conditional expressions whose two branches are the same expression.

use crate::analysis::{Registry, RuleContext};
use crate::config::RuleConfig;
use crate::error::RuleError;
use crate::tree::{Node, NodeKind};
use crate::types::{Confidence, Finding};

use super::RuleInfo;

pub const INFO: RuleInfo = RuleInfo {
    id: "pointless-conditional",
    title: "Conditional expression returns the same value on both branches",
    message: "Both branches of this conditional are '{0}'; the condition is pointless",
    confidence: Confidence::High,
};

pub fn register(registry: &mut Registry, _config: &RuleConfig) {
    registry.register(INFO.id, [NodeKind::Conditional], check);
}

/// # Errors
/// Propagates [`RuleError::TooComplex`] from the equivalence check.
pub fn check(node: &Node, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, RuleError> {
    let [_, then, otherwise] = node.children() else {
        return Ok(Vec::new());
    };
    if !ctx.equivalence().check(then, otherwise)? {
        return Ok(Vec::new());
    }
    let value = super::snippet(then.ungrouped(), ctx);
    Ok(vec![Finding::new(INFO.id, node.span()).with_arg(value)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::{ident, literal, run, wrap};
    use crate::semantic::{SourceModel, SymbolTable};
    use crate::tree::Span;

    #[test]
    fn same_branches_reported_on_whole_expression() {
        // cond ? x : x
        let source = "cond ? x : x";
        let tree = wrap(
            NodeKind::Conditional,
            vec![ident("cond", 0), ident("x", 7), ident("x", 11)],
        );
        let findings = run(register, &tree, &SourceModel::new(source));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].span, Span::new(0, 12));
        assert_eq!(findings[0].args, vec!["x".to_string()]);
    }

    #[test]
    fn distinct_branches_are_fine() {
        let tree = wrap(
            NodeKind::Conditional,
            vec![ident("cond", 0), literal("1", 7), literal("2", 11)],
        );
        assert!(run(register, &tree, &SymbolTable::new()).is_empty());
    }

    #[test]
    fn grouped_branch_still_matches() {
        let tree = wrap(
            NodeKind::Conditional,
            vec![
                ident("c", 0),
                wrap(NodeKind::Grouping, vec![literal("0", 5)]),
                literal("0", 10),
            ],
        );
        assert_eq!(run(register, &tree, &SymbolTable::new()).len(), 1);
    }
}
