// src/analysis/complexity.rs
//! Boundary-aware complexity scoring.
//!
//! A score counts the nodes classified as [`Category::Increasing`] inside one
//! boundary. Nested boundaries (closures, local functions) are skipped
//! entirely: they are scored on their own when dispatch reaches them, so
//! nothing is ever attributed to two boundaries.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::RuleError;
use crate::tree::{Node, NodeKind, Span};

use super::equivalence::DEFAULT_MAX_DEPTH;

/// How a node kind participates in a complexity count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    /// Adds one to the score.
    Increasing,
    /// Container that stays in the current scope. Traversed; its nested
    /// increasing nodes count.
    Compound,
    /// Traversed, no contribution.
    Plain,
}

/// Mapping from node kind to [`Category`]. Kinds not listed are plain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    increasing: BTreeSet<NodeKind>,
    compound: BTreeSet<NodeKind>,
}

impl Classification {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Logical operators and conditional expressions; argument lists and
    /// initializers stay in scope.
    #[must_use]
    pub fn expression_level() -> Self {
        Self::new()
            .with_increasing([NodeKind::LogicalAnd, NodeKind::LogicalOr, NodeKind::Conditional])
            .with_compound([NodeKind::ArgumentList, NodeKind::Initializer])
    }

    /// Expression-level kinds plus branching statements. Each `catch`
    /// clause and each case arm counts once; a loop counts once regardless
    /// of its body.
    #[must_use]
    pub fn function_level() -> Self {
        Self::expression_level().with_increasing([
            NodeKind::If,
            NodeKind::CaseArm,
            NodeKind::For,
            NodeKind::While,
            NodeKind::DoWhile,
            NodeKind::Loop,
            NodeKind::Catch,
            NodeKind::Coalesce,
        ])
    }

    #[must_use]
    pub fn with_increasing(mut self, kinds: impl IntoIterator<Item = NodeKind>) -> Self {
        self.increasing.extend(kinds);
        self
    }

    #[must_use]
    pub fn with_compound(mut self, kinds: impl IntoIterator<Item = NodeKind>) -> Self {
        self.compound.extend(kinds);
        self
    }

    /// Replaces the increasing set, keeping compound kinds.
    #[must_use]
    pub fn replace_increasing(mut self, kinds: impl IntoIterator<Item = NodeKind>) -> Self {
        self.increasing = kinds.into_iter().collect();
        self
    }

    /// Increasing wins if a kind is listed in both sets.
    #[must_use]
    pub fn category(&self, kind: NodeKind) -> Category {
        if self.increasing.contains(&kind) {
            Category::Increasing
        } else if self.compound.contains(&kind) {
            Category::Compound
        } else {
            Category::Plain
        }
    }

    #[must_use]
    pub fn is_compound(&self, kind: NodeKind) -> bool {
        self.category(kind) == Category::Compound
    }

    pub fn increasing_kinds(&self) -> impl Iterator<Item = NodeKind> + '_ {
        self.increasing.iter().copied()
    }
}

/// One node that contributed to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Contributor {
    pub kind: NodeKind,
    pub span: Span,
}

/// Result of scoring one root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    pub total: usize,
    /// Contributing nodes in source order.
    pub contributors: Vec<Contributor>,
}

impl Score {
    fn add(&mut self, node: &Node) {
        self.total += 1;
        self.contributors.push(Contributor {
            kind: node.kind(),
            span: node.span(),
        });
    }
}

pub struct ComplexityScorer<'c> {
    classification: &'c Classification,
    max_depth: usize,
}

impl<'c> ComplexityScorer<'c> {
    #[must_use]
    pub fn new(classification: &'c Classification) -> Self {
        Self {
            classification,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Scores `root`.
    ///
    /// A boundary root is never counted itself; any other root is counted
    /// when its own kind is increasing. Recovery subtrees contribute zero.
    ///
    /// # Errors
    /// Returns [`RuleError::TooComplex`] if the tree is deeper than the
    /// configured limit.
    pub fn score(&self, root: &Node) -> Result<Score, RuleError> {
        let mut score = Score::default();
        if root.kind().is_recovery() {
            return Ok(score);
        }
        if !root.kind().is_boundary()
            && self.classification.category(root.kind()) == Category::Increasing
        {
            score.add(root);
        }

        let mut stack: Vec<(&Node, usize)> =
            root.children().iter().rev().map(|c| (c, 1)).collect();

        while let Some((node, depth)) = stack.pop() {
            if depth > self.max_depth {
                return Err(RuleError::TooComplex {
                    limit: self.max_depth,
                });
            }
            let kind = node.kind();
            if kind.is_boundary() || kind.is_recovery() {
                continue;
            }
            if self.classification.category(kind) == Category::Increasing {
                score.add(node);
            }
            stack.extend(node.children().iter().rev().map(|c| (c, depth + 1)));
        }

        Ok(score)
    }
}

/// Convenience form with the default depth guard. A tree past the guard
/// scores zero.
#[must_use]
pub fn score(root: &Node, classification: &Classification) -> usize {
    ComplexityScorer::new(classification)
        .score(root)
        .map(|s| s.total)
        .unwrap_or_default()
}
