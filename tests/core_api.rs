// tests/core_api.rs - The analysis core driven by a caller-built tree and registry
use sonde_core::analysis::{equivalent, score, Classification, Dispatcher, Registry};
use sonde_core::config::RuleConfig;
use sonde_core::rules;
use sonde_core::semantic::{Symbol, SymbolKind, SymbolTable};
use sonde_core::tree::{Node, NodeKind, SemanticRef, Span};
use sonde_core::types::Finding;

fn ident(name: &str, at: usize) -> Node {
    Node::leaf(NodeKind::Identifier, Span::new(at, at + name.len()), name)
}

fn assign(target: Node, value: Node) -> Node {
    let at = target.span().end + 1;
    let span = Span::new(target.span().start, value.span().end);
    let op = Node::leaf(NodeKind::Operator, Span::new(at, at + 1), "=");
    Node::branch(NodeKind::Assignment, span, vec![target, op, value])
}

fn unit(statements: Vec<Node>) -> Node {
    let end = statements.last().map_or(0, |s| s.span().end);
    Node::branch(NodeKind::CompilationUnit, Span::new(0, end), statements)
}

#[test]
fn property_symbols_exempt_self_assignment() {
    let mut table = SymbolTable::new();
    table.insert(SemanticRef(1), Symbol::new("Width", SymbolKind::Property));
    table.insert(SemanticRef(2), Symbol::new("count", SymbolKind::Local));

    let property = assign(
        ident("Width", 0).with_semantic_ref(SemanticRef(1)),
        ident("Width", 8).with_semantic_ref(SemanticRef(1)),
    );
    let local = assign(
        ident("count", 20).with_semantic_ref(SemanticRef(2)),
        ident("count", 28).with_semantic_ref(SemanticRef(2)),
    );
    let dangling = assign(
        ident("ghost", 40).with_semantic_ref(SemanticRef(99)),
        ident("ghost", 48).with_semantic_ref(SemanticRef(99)),
    );
    let tree = unit(vec![property, local, dangling]);

    let registry = rules::registry(&RuleConfig::default());
    let out = Dispatcher::new(&registry).run(&tree, &table);
    let starts: Vec<usize> = out
        .findings
        .iter()
        .filter(|f| f.rule == "self-assignment")
        .map(|f| f.span.start)
        .collect();
    assert_eq!(starts, vec![20, 40]);
}

#[test]
fn caller_registered_predicate_sees_every_node_of_its_kind() {
    let tree = unit(vec![
        assign(ident("a", 0), ident("b", 4)),
        assign(ident("c", 10), ident("c", 14)),
        assign(ident("d", 20), ident("e", 24)),
    ]);

    let mut registry = Registry::new();
    registry.register("same-sides", [NodeKind::Assignment], |node, ctx| {
        let Some((left, right)) = node.operands() else {
            return Ok(Vec::new());
        };
        if ctx.equivalence().check(left, right)? {
            Ok(vec![Finding::new("same-sides", node.span())])
        } else {
            Ok(Vec::new())
        }
    });
    registry.register("count", [NodeKind::Identifier], |_, _| Ok(Vec::new()));

    let out = Dispatcher::new(&registry).run(&tree, &SymbolTable::new());
    assert!(out.completed);
    assert_eq!(out.visited, tree.descendants().count());
    assert_eq!(out.findings.len(), 1);
    assert_eq!(out.findings[0].span.start, 10);
}

#[test]
fn primitives_are_usable_directly() {
    let grouped = Node::branch(
        NodeKind::Grouping,
        Span::new(0, 3),
        vec![Node::branch(NodeKind::Grouping, Span::new(1, 2), vec![ident("x", 1)])],
    );
    assert!(equivalent(&ident("x", 9), &grouped));

    let and = Node::branch(
        NodeKind::LogicalAnd,
        Span::new(0, 6),
        vec![
            ident("a", 0),
            Node::leaf(NodeKind::Operator, Span::new(2, 4), "&&"),
            ident("b", 5),
        ],
    );
    assert_eq!(score(&and, &Classification::expression_level()), 1);
    assert_eq!(score(&and, &Classification::new()), 0);
}
