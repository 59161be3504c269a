// src/tree/kind.rs
//! The closed set of syntax categories the analysis core understands.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Syntax category of a [`Node`](super::Node).
///
/// Frontends map their own grammar onto these variants. Anything without a
/// dedicated variant lands in [`NodeKind::Unknown`] carrying the frontend's
/// kind id, so two unknown nodes still compare by identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    // Roots and declarations
    CompilationUnit,
    TypeDeclaration,
    Function,
    Method,
    LocalFunction,
    Lambda,
    ParameterList,
    LocalDeclaration,

    // Statements
    Block,
    ExpressionStatement,
    If,
    Switch,
    CaseArm,
    DefaultArm,
    For,
    While,
    DoWhile,
    Loop,
    Try,
    Catch,
    Finally,
    Return,
    Break,
    Continue,
    Throw,

    // Expressions
    Binary,
    LogicalAnd,
    LogicalOr,
    Coalesce,
    Unary,
    Conditional,
    Assignment,
    CompoundAssignment,
    Invocation,
    ArgumentList,
    MemberAccess,
    Index,
    Grouping,
    Initializer,
    Await,
    Cast,
    Range,

    // Tokens
    Identifier,
    Literal,
    Keyword,
    Operator,

    // Parser recovery
    Error,
    Missing,

    Unknown(u16),
}

impl NodeKind {
    /// Function-like declarations and anonymous functions. These scope
    /// complexity accounting.
    #[must_use]
    pub const fn is_boundary(self) -> bool {
        matches!(
            self,
            Self::Function | Self::Method | Self::LocalFunction | Self::Lambda
        )
    }

    /// Kinds that produce a value.
    #[must_use]
    pub const fn is_expression(self) -> bool {
        matches!(
            self,
            Self::Binary
                | Self::LogicalAnd
                | Self::LogicalOr
                | Self::Coalesce
                | Self::Unary
                | Self::Conditional
                | Self::Assignment
                | Self::CompoundAssignment
                | Self::Invocation
                | Self::MemberAccess
                | Self::Index
                | Self::Grouping
                | Self::Initializer
                | Self::Await
                | Self::Cast
                | Self::Range
                | Self::Lambda
                | Self::Identifier
                | Self::Literal
                | Self::Keyword
        )
    }

    /// Leaf tokens compared by text.
    #[must_use]
    pub const fn is_token(self) -> bool {
        matches!(
            self,
            Self::Identifier | Self::Literal | Self::Keyword | Self::Operator
        )
    }

    /// Nodes produced by parser error recovery.
    #[must_use]
    pub const fn is_recovery(self) -> bool {
        matches!(self, Self::Error | Self::Missing)
    }

    /// Binary-shaped kinds laid out as `[left, operator, right]`.
    #[must_use]
    pub const fn is_binary_shaped(self) -> bool {
        matches!(
            self,
            Self::Binary
                | Self::LogicalAnd
                | Self::LogicalOr
                | Self::Coalesce
                | Self::Assignment
                | Self::CompoundAssignment
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(id) => write!(f, "unknown({id})"),
            other => {
                let name = format!("{other:?}");
                let mut out = String::with_capacity(name.len() + 4);
                for (i, ch) in name.chars().enumerate() {
                    if ch.is_ascii_uppercase() && i > 0 {
                        out.push('_');
                    }
                    out.push(ch.to_ascii_lowercase());
                }
                f.write_str(&out)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_function_like() {
        assert!(NodeKind::Function.is_boundary());
        assert!(NodeKind::Lambda.is_boundary());
        assert!(NodeKind::LocalFunction.is_boundary());
        assert!(!NodeKind::Block.is_boundary());
        assert!(!NodeKind::Invocation.is_boundary());
    }

    #[test]
    fn display_uses_snake_case() {
        assert_eq!(NodeKind::LogicalAnd.to_string(), "logical_and");
        assert_eq!(NodeKind::If.to_string(), "if");
        assert_eq!(NodeKind::Unknown(7).to_string(), "unknown(7)");
    }

    #[test]
    fn config_names_round_trip_through_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            kinds: Vec<NodeKind>,
        }
        let parsed: Wrapper =
            toml::from_str(r#"kinds = ["logical_or", "case_arm", "do_while"]"#).unwrap();
        assert_eq!(
            parsed.kinds,
            vec![NodeKind::LogicalOr, NodeKind::CaseArm, NodeKind::DoWhile]
        );
    }
}
