// src/tree/mod.rs
//! Immutable syntax tree consumed by the analysis core.
//!
//! Trees are built once per source unit (by a frontend or by hand) and are
//! read-only afterwards. Children are owned by their parent.

mod kind;

pub use kind::NodeKind;

use serde::Serialize;
use std::fmt;

/// Byte offset range `[start, end)` into the source unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// True if `offset` lies inside the half-open range.
    #[must_use]
    pub const fn contains(self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Opaque handle into a semantic model. The core only hands it back to the
/// model; it never interprets the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SemanticRef(pub u32);

/// A syntax node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    kind: NodeKind,
    span: Span,
    text: Option<Box<str>>,
    children: Vec<Node>,
    semantic_ref: Option<SemanticRef>,
}

impl Node {
    /// Creates a token leaf carrying its source text.
    #[must_use]
    pub fn leaf(kind: NodeKind, span: Span, text: impl Into<Box<str>>) -> Self {
        Self {
            kind,
            span,
            text: Some(text.into()),
            children: Vec::new(),
            semantic_ref: None,
        }
    }

    /// Creates an interior node.
    #[must_use]
    pub fn branch(kind: NodeKind, span: Span, children: Vec<Node>) -> Self {
        Self {
            kind,
            span,
            text: None,
            children,
            semantic_ref: None,
        }
    }

    /// Creates a node with neither text nor children.
    #[must_use]
    pub fn empty(kind: NodeKind, span: Span) -> Self {
        Self::branch(kind, span, Vec::new())
    }

    #[must_use]
    pub fn with_semantic_ref(mut self, handle: SemanticRef) -> Self {
        self.semantic_ref = Some(handle);
        self
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Token text for leaves; `None` for interior nodes.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    #[must_use]
    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    #[must_use]
    pub fn semantic_ref(&self) -> Option<SemanticRef> {
        self.semantic_ref
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Strips redundant grouping: a grouping node with exactly one child is
    /// replaced by that child, repeatedly.
    #[must_use]
    pub fn ungrouped(&self) -> &Node {
        let mut node = self;
        while node.kind == NodeKind::Grouping && node.children.len() == 1 {
            node = &node.children[0];
        }
        node
    }

    /// Operator token of a binary-shaped node (`[left, operator, right]`).
    #[must_use]
    pub fn operator(&self) -> Option<&Node> {
        if !self.kind.is_binary_shaped() || self.children.len() != 3 {
            return None;
        }
        self.children
            .get(1)
            .filter(|op| op.kind == NodeKind::Operator)
    }

    /// Left and right operands of a binary-shaped node.
    #[must_use]
    pub fn operands(&self) -> Option<(&Node, &Node)> {
        self.operator()?;
        Some((&self.children[0], &self.children[2]))
    }

    /// First identifier among the direct children. Declarations use it as
    /// their name.
    #[must_use]
    pub fn first_identifier(&self) -> Option<&str> {
        self.children
            .iter()
            .find(|c| c.kind == NodeKind::Identifier)
            .and_then(Node::text)
    }

    /// Pre-order iterator over this node and all descendants.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// True if any node in this subtree (including itself) has `kind`.
    #[must_use]
    pub fn contains_kind(&self, kind: NodeKind) -> bool {
        self.descendants().any(|n| n.kind == kind)
    }

    /// Deepest node whose span contains `offset`.
    #[must_use]
    pub fn node_at(&self, offset: usize) -> Option<&Node> {
        if !self.span.contains(offset) {
            return None;
        }
        let mut current = self;
        while let Some(next) = current
            .children
            .iter()
            .find(|c| c.span.contains(offset))
        {
            current = next;
        }
        Some(current)
    }
}

/// Pre-order traversal driven by an explicit stack.
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
