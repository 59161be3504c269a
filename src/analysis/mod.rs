// src/analysis/mod.rs
//! Core analysis: the shared primitives, rule dispatch and the file engine.

pub mod complexity;
pub mod dispatch;
pub mod engine;
pub mod equivalence;
pub mod worker;

pub use complexity::{score, Category, Classification, ComplexityScorer, Contributor, Score};
pub use dispatch::{
    Dispatcher, Limits, Predicate, PredicateFailure, Registry, RuleContext, RunOutput,
    DISPATCH_RULE,
};
pub use engine::Engine;
pub use equivalence::{equivalent, Equivalence, DEFAULT_MAX_DEPTH};
