// src/frontend/lower.rs
use tree_sitter::Node as TsNode;

use crate::lang::Lang;
use crate::tree::{Node, NodeKind, Span};

use super::kinds;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Function,
    Type,
}

/// One lowering pass over a tree-sitter tree.
pub(super) struct Lowerer<'s> {
    lang: Lang,
    source: &'s str,
    max_depth: usize,
    scopes: Vec<Scope>,
    pub truncated: usize,
    pub syntax_errors: usize,
}

impl<'s> Lowerer<'s> {
    pub fn new(lang: Lang, source: &'s str, max_depth: usize) -> Self {
        Self {
            lang,
            source,
            max_depth,
            scopes: Vec::new(),
            truncated: 0,
            syntax_errors: 0,
        }
    }

    pub fn lower(&mut self, ts: TsNode<'_>, depth: usize) -> Node {
        let span = span_of(ts);
        if ts.is_missing() {
            self.syntax_errors += 1;
            return Node::empty(NodeKind::Missing, span);
        }
        if ts.is_error() {
            self.syntax_errors += 1;
            return Node::empty(NodeKind::Error, span);
        }
        if depth > self.max_depth {
            self.truncated += 1;
            return Node::empty(NodeKind::Error, span);
        }

        let kind = self.classify(ts);
        match kind {
            NodeKind::Identifier | NodeKind::Literal | NodeKind::Keyword => {
                Node::leaf(kind, span, self.text(ts))
            }
            NodeKind::If if self.lang == Lang::Python => self.lower_python_if(ts, depth),
            NodeKind::If => self.lower_if(ts, depth),
            NodeKind::Conditional if self.lang == Lang::Python => {
                self.lower_python_conditional(ts, depth)
            }
            NodeKind::TypeDeclaration => self.scoped(Scope::Type, kind, ts, depth),
            k if k.is_boundary() => self.scoped(Scope::Function, kind, ts, depth),
            _ => self.lower_generic(kind, ts, depth),
        }
    }

    fn classify(&self, ts: TsNode<'_>) -> NodeKind {
        let Some(kind) = kinds::map(self.lang, ts.kind()) else {
            return NodeKind::Unknown(ts.kind_id());
        };
        match kind {
            NodeKind::Function => match self.scopes.last() {
                Some(Scope::Function) => NodeKind::LocalFunction,
                Some(Scope::Type) => NodeKind::Method,
                None => NodeKind::Function,
            },
            NodeKind::Binary => ts
                .child_by_field_name("operator")
                .map_or(NodeKind::Binary, |op| kinds::refine_binary(op.kind())),
            NodeKind::CaseArm if self.is_wildcard_arm(ts) => NodeKind::DefaultArm,
            other => other,
        }
    }

    /// `_ =>` in Rust and `case _:` in Python, without a guard.
    fn is_wildcard_arm(&self, ts: TsNode<'_>) -> bool {
        let mut cursor = ts.walk();
        let guarded = ts.child_by_field_name("guard").is_some()
            || ts.named_children(&mut cursor).any(|c| c.kind() == "if_clause");
        if guarded {
            return false;
        }
        let patterns: Vec<TsNode<'_>> = ts.children_by_field_name("pattern", &mut cursor).collect();
        let pattern = match patterns.as_slice() {
            [only] => *only,
            [] => match ts.named_child(0) {
                Some(first) => first,
                None => return false,
            },
            _ => return false,
        };
        self.text(pattern).trim() == "_"
    }

    fn scoped(&mut self, scope: Scope, kind: NodeKind, ts: TsNode<'_>, depth: usize) -> Node {
        self.scopes.push(scope);
        let node = self.lower_generic(kind, ts, depth);
        self.scopes.pop();
        node
    }

    fn lower_generic(&mut self, kind: NodeKind, ts: TsNode<'_>, depth: usize) -> Node {
        let keeps_tokens = kind.is_binary_shaped()
            || matches!(kind, NodeKind::Unary | NodeKind::Range | NodeKind::Unknown(_));
        let keeps_access = matches!(
            kind,
            NodeKind::MemberAccess | NodeKind::Invocation | NodeKind::Index
        );
        let mut children = Vec::new();
        let mut cursor = ts.walk();
        for child in ts.children(&mut cursor) {
            if child.is_extra() {
                continue;
            }
            if child.is_named() {
                children.push(self.lower(child, depth + 1));
            } else if child.is_missing() {
                self.syntax_errors += 1;
            } else if (keeps_tokens && !kinds::is_punctuation(child.kind()))
                || (keeps_access && kinds::is_access_token(child.kind()))
            {
                children.push(Node::leaf(NodeKind::Operator, span_of(child), child.kind()));
            }
        }

        // Unnamed leaf-like nodes (types, modifiers) compare by their text.
        if children.is_empty() && matches!(kind, NodeKind::Unknown(_)) {
            let squashed: String = self.text(ts).split_whitespace().collect();
            if !squashed.is_empty() {
                return Node::leaf(kind, span_of(ts), squashed);
            }
        }
        Node::branch(kind, span_of(ts), children)
    }

    /// Rust and TypeScript: `[condition, then, else?]` with the `else`
    /// clause unwrapped.
    fn lower_if(&mut self, ts: TsNode<'_>, depth: usize) -> Node {
        let span = span_of(ts);
        let mut children = vec![self.condition_of(ts, depth)];
        children.push(match ts.child_by_field_name("consequence") {
            Some(then) => self.lower(then, depth + 1),
            None => Node::empty(NodeKind::Missing, span),
        });
        if let Some(alternative) = ts.child_by_field_name("alternative") {
            children.push(self.lower_else(alternative, depth + 1));
        }
        Node::branch(NodeKind::If, span, children)
    }

    fn condition_of(&mut self, ts: TsNode<'_>, depth: usize) -> Node {
        if let Some(condition) = ts.child_by_field_name("condition") {
            return self.lower(condition, depth + 1);
        }
        // `if let PATTERN = VALUE` in older Rust grammars.
        let parts: Vec<TsNode<'_>> = ["pattern", "value"]
            .iter()
            .filter_map(|field| ts.child_by_field_name(field))
            .collect();
        let (Some(first), Some(last)) = (parts.first(), parts.last()) else {
            return Node::empty(NodeKind::Missing, span_of(ts));
        };
        let span = Span::new(first.start_byte(), last.end_byte());
        let children = parts.iter().map(|p| self.lower(*p, depth + 2)).collect();
        Node::branch(NodeKind::Unknown(ts.kind_id()), span, children)
    }

    fn lower_else(&mut self, clause: TsNode<'_>, depth: usize) -> Node {
        if clause.kind() != "else_clause" {
            return self.lower(clause, depth);
        }
        let mut cursor = clause.walk();
        let body = clause
            .named_children(&mut cursor)
            .find(|c| !c.is_extra());
        match body {
            Some(body) => self.lower(body, depth),
            None => Node::empty(NodeKind::Missing, span_of(clause)),
        }
    }

    /// Folds `if / elif / else` into nested `if` nodes, innermost last.
    fn lower_python_if(&mut self, ts: TsNode<'_>, depth: usize) -> Node {
        let mut cursor = ts.walk();
        let alternatives: Vec<TsNode<'_>> =
            ts.children_by_field_name("alternative", &mut cursor).collect();

        let mut tail: Option<Node> = None;
        for alternative in alternatives.iter().rev() {
            tail = match alternative.kind() {
                "elif_clause" => Some(self.if_link(*alternative, tail.take(), ts.end_byte(), depth + 1)),
                _ => alternative
                    .child_by_field_name("body")
                    .map(|body| self.lower(body, depth + 1)),
            };
        }
        self.if_link(ts, tail, ts.end_byte(), depth)
    }

    fn if_link(&mut self, ts: TsNode<'_>, alternative: Option<Node>, end: usize, depth: usize) -> Node {
        let mut children = Vec::with_capacity(3);
        for field in ["condition", "consequence"] {
            children.push(match ts.child_by_field_name(field) {
                Some(part) => self.lower(part, depth + 1),
                None => Node::empty(NodeKind::Missing, span_of(ts)),
            });
        }
        children.extend(alternative);
        Node::branch(NodeKind::If, Span::new(ts.start_byte(), end), children)
    }

    /// `x if c else y` becomes `[c, x, y]`.
    fn lower_python_conditional(&mut self, ts: TsNode<'_>, depth: usize) -> Node {
        let mut cursor = ts.walk();
        let parts: Vec<TsNode<'_>> = ts
            .named_children(&mut cursor)
            .filter(|c| !c.is_extra())
            .collect();
        let mut children: Vec<Node> = parts.iter().map(|p| self.lower(*p, depth + 1)).collect();
        if children.len() == 3 {
            children.swap(0, 1);
        }
        Node::branch(NodeKind::Conditional, span_of(ts), children)
    }

    fn text(&self, ts: TsNode<'_>) -> &'s str {
        self.source.get(ts.start_byte()..ts.end_byte()).unwrap_or("")
    }
}

fn span_of(ts: TsNode<'_>) -> Span {
    Span::new(ts.start_byte(), ts.end_byte())
}
