// src/analysis/equivalence.rs
//! Structural equivalence of expression trees, modulo redundant grouping.
//!
//! Two nodes are equivalent when, after unwrapping single-child grouping
//! nodes, their kinds match and either both are tokens with the same text or
//! both have pairwise-equivalent children in the same order. The comparison
//! is purely syntactic: nothing is resolved or evaluated.

use crate::error::RuleError;
use crate::tree::Node;

/// Default nesting limit for comparisons.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Equivalence checker with a depth guard.
#[derive(Debug, Clone, Copy)]
pub struct Equivalence {
    max_depth: usize,
}

impl Default for Equivalence {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl Equivalence {
    #[must_use]
    pub const fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Compares two sub-trees.
    ///
    /// # Errors
    /// Returns [`RuleError::TooComplex`] if the comparison descends past the
    /// configured depth.
    pub fn check(&self, a: &Node, b: &Node) -> Result<bool, RuleError> {
        let mut work: Vec<(&Node, &Node, usize)> = vec![(a, b, 0)];

        while let Some((left, right, depth)) = work.pop() {
            if depth > self.max_depth {
                return Err(RuleError::TooComplex {
                    limit: self.max_depth,
                });
            }

            let left = left.ungrouped();
            let right = right.ungrouped();
            if !shallow_match(left, right) {
                return Ok(false);
            }

            work.extend(
                left.children()
                    .iter()
                    .zip(right.children())
                    .rev()
                    .map(|(l, r)| (l, r, depth + 1)),
            );
        }

        Ok(true)
    }
}

/// Kind, token text and arity agree. Recovery nodes never match.
fn shallow_match(left: &Node, right: &Node) -> bool {
    if left.kind().is_recovery() || right.kind().is_recovery() {
        return false;
    }
    left.kind() == right.kind()
        && left.text() == right.text()
        && left.children().len() == right.children().len()
}

/// Convenience form with the default depth guard. A comparison that hits
/// the guard counts as a non-match.
#[must_use]
pub fn equivalent(a: &Node, b: &Node) -> bool {
    Equivalence::default().check(a, b).unwrap_or(false)
}
