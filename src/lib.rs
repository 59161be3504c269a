//! `sonde`: a structural rule engine for source-code checks.
//!
//! The core ([`analysis`], [`rules`], [`tree`], [`semantic`]) works on an
//! immutable syntax tree and never parses. [`frontend`] lowers tree-sitter
//! trees into that model for the file engine and the `sonde` binary.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod exit;
pub mod frontend;
pub mod lang;
pub mod reporting;
pub mod rules;
pub mod semantic;
pub mod tree;
pub mod types;
