// src/analysis/dispatch.rs
//! Rule dispatch: one pre-order walk, fan-out to every predicate registered
//! for the visited node's kind.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::Serialize;

use crate::error::RuleError;
use crate::semantic::{SemanticModel, Symbol};
use crate::tree::{Node, NodeKind, Span};
use crate::types::Finding;

use super::complexity::{Classification, ComplexityScorer};
use super::equivalence::{Equivalence, DEFAULT_MAX_DEPTH};

/// Rule id used for failures raised by the dispatcher itself.
pub const DISPATCH_RULE: &str = "dispatch";

/// Signature shared by every rule predicate.
pub type Predicate =
    dyn Fn(&Node, &RuleContext<'_>) -> Result<Vec<Finding>, RuleError> + Send + Sync;

/// Resource limits applied to one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Deepest nesting the dispatcher walks and the shared primitives
    /// compare or score.
    pub max_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

struct Registration {
    rule: &'static str,
    kinds: BTreeSet<NodeKind>,
    predicate: Box<Predicate>,
}

/// Explicit set of rule registrations, built by the caller.
///
/// Registrations are immutable once added and the registry is `Sync`, so
/// one registry can serve parallel runs over different trees.
#[derive(Default)]
pub struct Registry {
    registrations: Vec<Registration>,
    by_kind: HashMap<NodeKind, Vec<usize>>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.registrations.iter().map(|r| (r.rule, &r.kinds)))
            .finish()
    }
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes `predicate` to every kind in `kinds`.
    pub fn register<F>(
        &mut self,
        rule: &'static str,
        kinds: impl IntoIterator<Item = NodeKind>,
        predicate: F,
    ) where
        F: Fn(&Node, &RuleContext<'_>) -> Result<Vec<Finding>, RuleError> + Send + Sync + 'static,
    {
        let index = self.registrations.len();
        let kinds: BTreeSet<NodeKind> = kinds.into_iter().collect();
        for kind in &kinds {
            self.by_kind.entry(*kind).or_default().push(index);
        }
        self.registrations.push(Registration {
            rule,
            kinds,
            predicate: Box::new(predicate),
        });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Rule ids in registration order.
    pub fn rules(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.registrations.iter().map(|r| r.rule)
    }

    #[must_use]
    pub fn handles(&self, kind: NodeKind) -> bool {
        self.by_kind.contains_key(&kind)
    }

    fn matching(&self, kind: NodeKind) -> impl Iterator<Item = &Registration> + '_ {
        self.by_kind
            .get(&kind)
            .into_iter()
            .flatten()
            .filter_map(|&i| self.registrations.get(i))
    }
}

/// Read-only view handed to a predicate for one node.
pub struct RuleContext<'a> {
    model: &'a dyn SemanticModel,
    root: &'a Node,
    ancestors: &'a [&'a Node],
    limits: Limits,
}

impl<'a> RuleContext<'a> {
    #[must_use]
    pub fn new(
        model: &'a dyn SemanticModel,
        root: &'a Node,
        ancestors: &'a [&'a Node],
        limits: Limits,
    ) -> Self {
        Self {
            model,
            root,
            ancestors,
            limits,
        }
    }

    #[must_use]
    pub fn parent(&self) -> Option<&'a Node> {
        self.ancestors.last().copied()
    }

    /// Ancestors from the root down to the parent.
    #[must_use]
    pub fn ancestors(&self) -> &'a [&'a Node] {
        self.ancestors
    }

    #[must_use]
    pub fn root(&self) -> &'a Node {
        self.root
    }

    #[must_use]
    pub fn resolve(&self, node: &Node) -> Option<Symbol> {
        self.model.resolve(node)
    }

    #[must_use]
    pub fn text_of<'n>(&'n self, node: &'n Node) -> Option<&'n str> {
        self.model.text_of(node)
    }

    /// Deepest node of the current tree covering `offset`.
    #[must_use]
    pub fn node_at(&self, offset: usize) -> Option<&'a Node> {
        self.root.node_at(offset)
    }

    #[must_use]
    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Equivalence checker honoring this run's limits.
    #[must_use]
    pub fn equivalence(&self) -> Equivalence {
        Equivalence::new(self.limits.max_depth)
    }

    /// Complexity scorer honoring this run's limits.
    #[must_use]
    pub fn scorer<'c>(&self, classification: &'c Classification) -> ComplexityScorer<'c> {
        ComplexityScorer::new(classification).with_max_depth(self.limits.max_depth)
    }
}

/// A predicate that failed on one node. Reported next to findings, never
/// turned into one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredicateFailure {
    pub rule: &'static str,
    pub kind: NodeKind,
    pub span: Span,
    pub message: String,
}

/// Everything one run produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunOutput {
    pub findings: Vec<Finding>,
    pub failures: Vec<PredicateFailure>,
    pub visited: usize,
    /// False when the run stopped early on request.
    pub completed: bool,
}

/// Walks one tree and drives the registry.
pub struct Dispatcher<'r> {
    registry: &'r Registry,
    limits: Limits,
}

impl<'r> Dispatcher<'r> {
    #[must_use]
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            limits: Limits::default(),
        }
    }

    #[must_use]
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    #[must_use]
    pub fn run(&self, root: &Node, model: &dyn SemanticModel) -> RunOutput {
        self.run_until(root, model, || false)
    }

    /// Like [`run`](Self::run), but polls `should_stop` before every node
    /// visit and returns the partial output once it fires.
    pub fn run_until<S>(&self, root: &Node, model: &dyn SemanticModel, should_stop: S) -> RunOutput
    where
        S: Fn() -> bool,
    {
        let mut out = RunOutput {
            completed: true,
            ..RunOutput::default()
        };
        let mut stack: Vec<(&Node, usize)> = vec![(root, 0)];
        let mut ancestors: Vec<&Node> = Vec::new();

        while let Some((node, depth)) = stack.pop() {
            if should_stop() {
                out.completed = false;
                break;
            }
            ancestors.truncate(depth);
            out.visited += 1;
            self.visit(node, root, &ancestors, model, &mut out);

            if node.is_leaf() {
                continue;
            }
            if depth >= self.limits.max_depth {
                self.record_depth_failure(node, &mut out);
                continue;
            }
            ancestors.push(node);
            stack.extend(node.children().iter().rev().map(|c| (c, depth + 1)));
        }

        out
    }

    fn visit(
        &self,
        node: &Node,
        root: &Node,
        ancestors: &[&Node],
        model: &dyn SemanticModel,
        out: &mut RunOutput,
    ) {
        if !self.registry.handles(node.kind()) {
            return;
        }
        let ctx = RuleContext::new(model, root, ancestors, self.limits);
        for registration in self.registry.matching(node.kind()) {
            match (registration.predicate)(node, &ctx) {
                Ok(findings) => out.findings.extend(findings),
                Err(error) => {
                    tracing::warn!(
                        rule = registration.rule,
                        kind = %node.kind(),
                        span = %node.span(),
                        %error,
                        "rule predicate failed"
                    );
                    out.failures.push(PredicateFailure {
                        rule: registration.rule,
                        kind: node.kind(),
                        span: node.span(),
                        message: error.to_string(),
                    });
                }
            }
        }
    }

    fn record_depth_failure(&self, node: &Node, out: &mut RunOutput) {
        let error = RuleError::TooComplex {
            limit: self.limits.max_depth,
        };
        tracing::warn!(kind = %node.kind(), span = %node.span(), %error, "subtree skipped");
        out.failures.push(PredicateFailure {
            rule: DISPATCH_RULE,
            kind: node.kind(),
            span: node.span(),
            message: error.to_string(),
        });
    }
}
