// src/frontend/mod.rs
//! Lowers tree-sitter syntax trees into the [`Node`] model.
//!
//! This is a thin adapter, not a compiler frontend: it does no name binding
//! and no typing. Comments and punctuation are dropped, operator tokens are
//! kept where they matter, and per-language shapes are normalized (`elif`
//! chains, Python's conditional expression) so the rules see one layout.

mod kinds;
mod lower;

use tree_sitter::{Parser, Tree};

use crate::error::{Result, SondeError};
use crate::lang::Lang;
use crate::tree::Node;

use lower::Lowerer;

/// A parsed and lowered source buffer.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    pub lang: Lang,
    pub root: Node,
    /// Subtrees cut off at the depth limit.
    pub truncated: usize,
    /// Error and missing nodes produced by parser recovery.
    pub syntax_errors: usize,
}

/// Parses `source` with the grammar for `lang`.
///
/// # Errors
/// Returns [`SondeError::Parse`] if the grammar cannot be loaded or the
/// parser gives up.
pub fn parse(lang: Lang, source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(lang.grammar())
        .map_err(|e| SondeError::Parse(format!("{} grammar: {e}", lang.name())))?;
    parser
        .parse(source, None)
        .ok_or_else(|| SondeError::Parse(format!("{} source", lang.name())))
}

/// Lowers an already parsed tree. Nesting deeper than `max_depth` is
/// replaced by `error` nodes and counted in [`SourceUnit::truncated`].
#[must_use]
pub fn lower(lang: Lang, tree: &Tree, source: &str, max_depth: usize) -> SourceUnit {
    let mut lowerer = Lowerer::new(lang, source, max_depth);
    let root = lowerer.lower(tree.root_node(), 0);
    SourceUnit {
        lang,
        root,
        truncated: lowerer.truncated,
        syntax_errors: lowerer.syntax_errors,
    }
}

/// [`parse`] then [`lower`].
///
/// # Errors
/// See [`parse`].
pub fn load(lang: Lang, source: &str, max_depth: usize) -> Result<SourceUnit> {
    let tree = parse(lang, source)?;
    Ok(lower(lang, &tree, source, max_depth))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeKind;

    fn first(root: &Node, kind: NodeKind) -> Node {
        root.descendants()
            .find(|n| n.kind() == kind)
            .cloned()
            .unwrap_or_else(|| panic!("no {kind} in tree"))
    }

    fn kinds(node: &Node) -> Vec<NodeKind> {
        node.children().iter().map(Node::kind).collect()
    }

    #[test]
    fn rust_binary_keeps_operator() {
        let unit = load(Lang::Rust, "fn f(a: i32) -> i32 { a - a }", 512).unwrap();
        assert_eq!(unit.root.kind(), NodeKind::CompilationUnit);
        assert_eq!(unit.syntax_errors, 0);
        let function = first(&unit.root, NodeKind::Function);
        assert_eq!(function.first_identifier(), Some("f"));
        let binary = first(&unit.root, NodeKind::Binary);
        assert_eq!(
            kinds(&binary),
            vec![NodeKind::Identifier, NodeKind::Operator, NodeKind::Identifier]
        );
        assert_eq!(binary.operator().and_then(Node::text), Some("-"));
    }

    #[test]
    fn logical_operators_are_refined() {
        let unit = load(Lang::TypeScript, "x = (a && b) || (c ?? d);", 512).unwrap();
        assert!(unit.root.contains_kind(NodeKind::LogicalAnd));
        assert!(unit.root.contains_kind(NodeKind::LogicalOr));
        assert!(unit.root.contains_kind(NodeKind::Coalesce));
        let unit = load(Lang::Python, "x = a and b or c\n", 512).unwrap();
        assert!(unit.root.contains_kind(NodeKind::LogicalAnd));
        assert!(unit.root.contains_kind(NodeKind::LogicalOr));
    }

    #[test]
    fn comments_are_dropped() {
        let plain = load(Lang::TypeScript, "f(a, b);", 512).unwrap();
        let commented = load(Lang::TypeScript, "f(a, /* note */ b);", 512).unwrap();
        let call = first(&plain.root, NodeKind::ArgumentList);
        let other = first(&commented.root, NodeKind::ArgumentList);
        assert_eq!(kinds(&call), kinds(&other));
        assert!(crate::analysis::equivalent(&call, &other));
    }

    #[test]
    fn python_conditional_is_reordered() {
        let unit = load(Lang::Python, "y = x if c else z\n", 512).unwrap();
        let conditional = first(&unit.root, NodeKind::Conditional);
        let texts: Vec<&str> = conditional.children().iter().filter_map(Node::text).collect();
        assert_eq!(texts, vec!["c", "x", "z"]);
    }

    #[test]
    fn python_elif_chain_is_nested() {
        let source = "if a:\n    x()\nelif b:\n    y()\nelse:\n    z()\n";
        let unit = load(Lang::Python, source, 512).unwrap();
        let head = first(&unit.root, NodeKind::If);
        assert_eq!(head.child(0).and_then(Node::text), Some("a"));
        let elif = head.child(2).unwrap();
        assert_eq!(elif.kind(), NodeKind::If);
        assert_eq!(elif.child(0).and_then(Node::text), Some("b"));
        assert_eq!(elif.child(2).map(Node::kind), Some(NodeKind::Block));
    }

    #[test]
    fn typescript_else_if_is_nested() {
        let unit = load(Lang::TypeScript, "if (a) { f(); } else if (b) { g(); }", 512).unwrap();
        let head = first(&unit.root, NodeKind::If);
        assert_eq!(head.children().len(), 3);
        assert_eq!(head.child(2).map(Node::kind), Some(NodeKind::If));
        assert_eq!(head.child(0).map(Node::kind), Some(NodeKind::Grouping));
    }

    #[test]
    fn function_scopes() {
        let source = "class A { m() { function inner() {} } }\nfunction top() {}";
        let unit = load(Lang::TypeScript, source, 512).unwrap();
        assert!(unit.root.contains_kind(NodeKind::Method));
        assert!(unit.root.contains_kind(NodeKind::LocalFunction));
        assert_eq!(first(&unit.root, NodeKind::Function).first_identifier(), Some("top"));

        let unit = load(Lang::Python, "class A:\n    def m(self):\n        pass\n", 512).unwrap();
        assert_eq!(first(&unit.root, NodeKind::Method).first_identifier(), Some("m"));

        let unit = load(Lang::Rust, "impl A { fn m(&self) { fn helper() {} } }", 512).unwrap();
        assert!(unit.root.contains_kind(NodeKind::Method));
        assert!(unit.root.contains_kind(NodeKind::LocalFunction));
    }

    #[test]
    fn wildcard_arms_are_default_arms() {
        let unit = load(Lang::Rust, "fn f(x: i32) -> i32 { match x { 1 => 1, _ => 2 } }", 512).unwrap();
        let arms = &first(&unit.root, NodeKind::Switch);
        assert!(arms.contains_kind(NodeKind::CaseArm));
        assert!(arms.contains_kind(NodeKind::DefaultArm));

        let guarded = load(Lang::Rust, "fn f(x: i32) -> i32 { match x { _ if x > 1 => 1, _ => 2 } }", 512).unwrap();
        let kinds: Vec<NodeKind> = guarded
            .root
            .descendants()
            .map(Node::kind)
            .filter(|k| matches!(k, NodeKind::CaseArm | NodeKind::DefaultArm))
            .collect();
        assert_eq!(kinds, vec![NodeKind::CaseArm, NodeKind::DefaultArm]);

        let source = "match x:\n    case 1:\n        pass\n    case _:\n        pass\n";
        let unit = load(Lang::Python, source, 512).unwrap();
        assert!(unit.root.contains_kind(NodeKind::CaseArm));
        assert!(unit.root.contains_kind(NodeKind::DefaultArm));
    }

    #[test]
    fn optional_chain_and_new_are_kept() {
        let unit = load(Lang::TypeScript, "x = a?.b;\ny = a.b;\nz = a.b;", 512).unwrap();
        let members: Vec<&Node> = unit
            .root
            .descendants()
            .filter(|n| n.kind() == NodeKind::MemberAccess)
            .collect();
        assert_eq!(members.len(), 3);
        assert!(!crate::analysis::equivalent(members[0], members[1]));
        assert!(crate::analysis::equivalent(members[1], members[2]));

        let unit = load(Lang::TypeScript, "x = new F(a);\ny = F(a);", 512).unwrap();
        let calls: Vec<&Node> = unit
            .root
            .descendants()
            .filter(|n| n.kind() == NodeKind::Invocation)
            .collect();
        assert_eq!(calls.len(), 2);
        assert!(!crate::analysis::equivalent(calls[0], calls[1]));
    }

    #[test]
    fn syntax_errors_become_recovery_nodes() {
        let unit = load(Lang::TypeScript, "let x = (a + ;", 512).unwrap();
        assert!(unit.syntax_errors > 0);
    }

    #[test]
    fn deep_nesting_is_truncated() {
        let source = format!("x = {}a{};", "(".repeat(40), ")".repeat(40));
        let unit = load(Lang::TypeScript, &source, 10).unwrap();
        assert!(unit.truncated > 0);
        assert!(unit.root.contains_kind(NodeKind::Error));
    }
}
