// src/rules/mod.rs
//! The rule catalogue.
//!
//! Every rule is a stateless predicate built on the shared primitives
//! (equivalence and complexity scoring). [`registry`] wires the enabled
//! rules into a fresh [`Registry`] for one configuration.

pub mod duplicate_condition;
pub mod duplicate_operand;
pub mod expression_complexity;
pub mod function_complexity;
pub mod identical_branches;
pub mod pointless_conditional;
pub mod self_assignment;

use crate::analysis::{Registry, RuleContext};
use crate::config::RuleConfig;
use crate::tree::Node;
use crate::types::Confidence;

/// Static description of a rule, used only for reporting.
#[derive(Debug, Clone, Copy)]
pub struct RuleInfo {
    pub id: &'static str,
    pub title: &'static str,
    /// Message template; `{0}`, `{1}`, ... are replaced by finding args.
    pub message: &'static str,
    pub confidence: Confidence,
}

impl RuleInfo {
    /// Interpolates finding arguments into the message template.
    #[must_use]
    pub fn render(&self, args: &[String]) -> String {
        args.iter()
            .enumerate()
            .fold(self.message.to_string(), |msg, (i, arg)| {
                msg.replace(&format!("{{{i}}}"), arg)
            })
    }
}

/// All rules, in registration order.
pub const CATALOGUE: &[RuleInfo] = &[
    duplicate_operand::INFO,
    pointless_conditional::INFO,
    identical_branches::INFO,
    duplicate_condition::INFO,
    self_assignment::INFO,
    expression_complexity::INFO,
    function_complexity::INFO,
];

/// Looks up catalogue metadata by rule id.
#[must_use]
pub fn info(id: &str) -> Option<&'static RuleInfo> {
    CATALOGUE.iter().find(|r| r.id == id)
}

/// Builds a registry holding every rule enabled in `config`.
#[must_use]
pub fn registry(config: &RuleConfig) -> Registry {
    let mut registry = Registry::new();
    let registrars: [(&str, fn(&mut Registry, &RuleConfig)); 7] = [
        (duplicate_operand::INFO.id, duplicate_operand::register),
        (pointless_conditional::INFO.id, pointless_conditional::register),
        (identical_branches::INFO.id, identical_branches::register),
        (duplicate_condition::INFO.id, duplicate_condition::register),
        (self_assignment::INFO.id, self_assignment::register),
        (expression_complexity::INFO.id, expression_complexity::register),
        (function_complexity::INFO.id, function_complexity::register),
    ];
    for (id, register) in registrars {
        if config.is_enabled(id) {
            register(&mut registry, config);
        }
    }
    registry
}

/// Source text of `node` for message arguments. Without source text the
/// token texts are joined instead.
pub(crate) fn snippet(node: &Node, ctx: &RuleContext<'_>) -> String {
    const MAX: usize = 60;
    let flat = match ctx.text_of(node) {
        Some(text) => text.split_whitespace().collect::<Vec<_>>().join(" "),
        None => node
            .descendants()
            .filter_map(Node::text)
            .collect::<Vec<_>>()
            .join(" "),
    };
    if flat.is_empty() {
        return node.kind().to_string();
    }
    if flat.chars().count() > MAX {
        let cut: String = flat.chars().take(MAX).collect();
        format!("{cut}...")
    } else {
        flat
    }
}

/// True if `node` is the `else` branch of its parent `if`.
pub(crate) fn is_else_if(node: &Node, ctx: &RuleContext<'_>) -> bool {
    ctx.parent().is_some_and(|parent| {
        parent.kind() == crate::tree::NodeKind::If
            && parent.child(2).is_some_and(|alt| std::ptr::eq(alt, node))
    })
}
