// src/semantic.rs
//! Read-only semantic lookups handed to rule predicates.

use std::collections::HashMap;

use serde::Serialize;

use crate::tree::{Node, SemanticRef};

/// What a resolved name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SymbolKind {
    Local,
    Parameter,
    Field,
    /// Accessor-backed member. Reads and writes may run arbitrary code.
    Property,
    Method,
    Type,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
}

impl Symbol {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: SymbolKind) -> Self {
        Self { name: name.into(), kind }
    }
}

/// Semantic services supplied by the caller.
///
/// Implementations must be side-effect free: predicates may call them any
/// number of times in any order. A dangling reference resolves to `None`.
pub trait SemanticModel: Sync {
    /// Resolves the node's semantic reference to a symbol.
    fn resolve(&self, node: &Node) -> Option<Symbol>;

    /// Raw source text covered by the node.
    fn text_of<'a>(&'a self, node: &'a Node) -> Option<&'a str>;
}

/// Semantic model backed only by the source text. Nothing resolves.
#[derive(Debug, Clone, Copy)]
pub struct SourceModel<'s> {
    source: &'s str,
}

impl<'s> SourceModel<'s> {
    #[must_use]
    pub fn new(source: &'s str) -> Self {
        Self { source }
    }
}

impl SemanticModel for SourceModel<'_> {
    fn resolve(&self, _node: &Node) -> Option<Symbol> {
        None
    }

    fn text_of<'a>(&'a self, node: &'a Node) -> Option<&'a str> {
        let span = node.span();
        self.source.get(span.start..span.end).or_else(|| node.text())
    }
}

/// In-memory symbol table keyed by semantic reference.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: HashMap<SemanticRef, Symbol>,
}

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, handle: SemanticRef, symbol: Symbol) {
        self.symbols.insert(handle, symbol);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl SemanticModel for SymbolTable {
    fn resolve(&self, node: &Node) -> Option<Symbol> {
        node.semantic_ref()
            .and_then(|handle| self.symbols.get(&handle))
            .cloned()
    }

    fn text_of<'a>(&'a self, node: &'a Node) -> Option<&'a str> {
        node.text()
    }
}
