// src/frontend/kinds.rs
//! Grammar node names mapped onto [`NodeKind`].
//!
//! Function-like declarations map to [`NodeKind::Function`]; the lowerer
//! narrows them to methods or local functions from the enclosing scope.

use crate::lang::Lang;
use crate::tree::NodeKind;

/// Anonymous tokens that never carry meaning for the analysis.
const PUNCTUATION: &[&str] = &["(", ")", "[", "]", "{", "}", ",", ";", ":", ".", "\"", "'", "`"];

/// Maps a named grammar node. `None` means the model has no variant for it.
#[must_use]
pub fn map(lang: Lang, kind: &str) -> Option<NodeKind> {
    match lang {
        Lang::Rust => rust(kind),
        Lang::Python => python(kind),
        Lang::TypeScript | Lang::Tsx => typescript(kind),
    }
}

/// Narrows a `binary` node by its operator token.
#[must_use]
pub fn refine_binary(operator: &str) -> NodeKind {
    match operator {
        "&&" | "and" => NodeKind::LogicalAnd,
        "||" | "or" => NodeKind::LogicalOr,
        "??" => NodeKind::Coalesce,
        _ => NodeKind::Binary,
    }
}

/// Tokens that set accesses and calls apart: `a?.b` from `a.b`, `new F()`
/// from `F()`.
#[must_use]
pub fn is_access_token(token: &str) -> bool {
    matches!(token, "?." | "new")
}

#[must_use]
pub fn is_punctuation(token: &str) -> bool {
    token.is_empty() || PUNCTUATION.contains(&token)
}

fn rust(kind: &str) -> Option<NodeKind> {
    let mapped = match kind {
        "source_file" => NodeKind::CompilationUnit,
        "impl_item" | "trait_item" => NodeKind::TypeDeclaration,
        "function_item" => NodeKind::Function,
        "closure_expression" => NodeKind::Lambda,
        "parameters" | "closure_parameters" => NodeKind::ParameterList,
        "let_declaration" => NodeKind::LocalDeclaration,
        "block" => NodeKind::Block,
        "expression_statement" => NodeKind::ExpressionStatement,
        "if_expression" | "if_let_expression" => NodeKind::If,
        "match_expression" => NodeKind::Switch,
        "match_arm" => NodeKind::CaseArm,
        "for_expression" => NodeKind::For,
        "while_expression" | "while_let_expression" => NodeKind::While,
        "loop_expression" => NodeKind::Loop,
        "return_expression" => NodeKind::Return,
        "break_expression" => NodeKind::Break,
        "continue_expression" => NodeKind::Continue,
        "binary_expression" => NodeKind::Binary,
        "unary_expression" => NodeKind::Unary,
        "assignment_expression" => NodeKind::Assignment,
        "compound_assignment_expr" => NodeKind::CompoundAssignment,
        "call_expression" => NodeKind::Invocation,
        "arguments" => NodeKind::ArgumentList,
        "field_expression" => NodeKind::MemberAccess,
        "index_expression" => NodeKind::Index,
        "parenthesized_expression" => NodeKind::Grouping,
        "array_expression" | "struct_expression" | "tuple_expression" => NodeKind::Initializer,
        "await_expression" => NodeKind::Await,
        "type_cast_expression" => NodeKind::Cast,
        "range_expression" => NodeKind::Range,
        "identifier" | "field_identifier" | "type_identifier" | "shorthand_field_identifier"
        | "primitive_type" => NodeKind::Identifier,
        "self" | "super" | "crate" => NodeKind::Keyword,
        "integer_literal" | "float_literal" | "string_literal" | "raw_string_literal"
        | "char_literal" | "boolean_literal" => NodeKind::Literal,
        _ => return None,
    };
    Some(mapped)
}

fn python(kind: &str) -> Option<NodeKind> {
    let mapped = match kind {
        "module" => NodeKind::CompilationUnit,
        "class_definition" => NodeKind::TypeDeclaration,
        "function_definition" => NodeKind::Function,
        "lambda" => NodeKind::Lambda,
        "parameters" | "lambda_parameters" => NodeKind::ParameterList,
        "block" => NodeKind::Block,
        "expression_statement" => NodeKind::ExpressionStatement,
        "if_statement" => NodeKind::If,
        "conditional_expression" => NodeKind::Conditional,
        "match_statement" => NodeKind::Switch,
        "case_clause" => NodeKind::CaseArm,
        "for_statement" => NodeKind::For,
        "while_statement" => NodeKind::While,
        "try_statement" => NodeKind::Try,
        "except_clause" => NodeKind::Catch,
        "finally_clause" => NodeKind::Finally,
        "return_statement" => NodeKind::Return,
        "break_statement" => NodeKind::Break,
        "continue_statement" => NodeKind::Continue,
        "raise_statement" => NodeKind::Throw,
        "boolean_operator" | "binary_operator" | "comparison_operator" => NodeKind::Binary,
        "not_operator" | "unary_operator" => NodeKind::Unary,
        "assignment" => NodeKind::Assignment,
        "augmented_assignment" => NodeKind::CompoundAssignment,
        "call" => NodeKind::Invocation,
        "argument_list" => NodeKind::ArgumentList,
        "attribute" => NodeKind::MemberAccess,
        "subscript" => NodeKind::Index,
        "parenthesized_expression" => NodeKind::Grouping,
        "list" | "dictionary" | "set" | "tuple" => NodeKind::Initializer,
        "await" => NodeKind::Await,
        "identifier" => NodeKind::Identifier,
        "integer" | "float" | "string" | "concatenated_string" | "true" | "false" | "none" => {
            NodeKind::Literal
        }
        _ => return None,
    };
    Some(mapped)
}

fn typescript(kind: &str) -> Option<NodeKind> {
    let mapped = match kind {
        "program" => NodeKind::CompilationUnit,
        "class_declaration" | "abstract_class_declaration" | "class" => NodeKind::TypeDeclaration,
        "function_declaration" | "generator_function_declaration" => NodeKind::Function,
        "method_definition" => NodeKind::Method,
        "arrow_function" | "function" | "function_expression" | "generator_function" => {
            NodeKind::Lambda
        }
        "formal_parameters" => NodeKind::ParameterList,
        "lexical_declaration" | "variable_declaration" => NodeKind::LocalDeclaration,
        "statement_block" => NodeKind::Block,
        "expression_statement" => NodeKind::ExpressionStatement,
        "if_statement" => NodeKind::If,
        "switch_statement" => NodeKind::Switch,
        "switch_case" => NodeKind::CaseArm,
        "switch_default" => NodeKind::DefaultArm,
        "for_statement" | "for_in_statement" => NodeKind::For,
        "while_statement" => NodeKind::While,
        "do_statement" => NodeKind::DoWhile,
        "try_statement" => NodeKind::Try,
        "catch_clause" => NodeKind::Catch,
        "finally_clause" => NodeKind::Finally,
        "return_statement" => NodeKind::Return,
        "break_statement" => NodeKind::Break,
        "continue_statement" => NodeKind::Continue,
        "throw_statement" => NodeKind::Throw,
        "binary_expression" => NodeKind::Binary,
        "unary_expression" | "update_expression" => NodeKind::Unary,
        "ternary_expression" => NodeKind::Conditional,
        "assignment_expression" => NodeKind::Assignment,
        "augmented_assignment_expression" => NodeKind::CompoundAssignment,
        "call_expression" | "new_expression" => NodeKind::Invocation,
        "arguments" => NodeKind::ArgumentList,
        "member_expression" => NodeKind::MemberAccess,
        "subscript_expression" => NodeKind::Index,
        "parenthesized_expression" => NodeKind::Grouping,
        "array" | "object" => NodeKind::Initializer,
        "await_expression" => NodeKind::Await,
        "as_expression" => NodeKind::Cast,
        "identifier" | "property_identifier" | "shorthand_property_identifier"
        | "private_property_identifier" | "type_identifier" => NodeKind::Identifier,
        "this" | "super" => NodeKind::Keyword,
        "number" | "string" | "template_string" | "regex" | "true" | "false" | "null"
        | "undefined" => NodeKind::Literal,
        _ => return None,
    };
    Some(mapped)
}
