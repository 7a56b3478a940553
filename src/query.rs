//! AST query utilities shared by the detectors.
//!
//! All functions are pure lookups over one [`SyntaxTree`]. Absence is a normal
//! outcome and is reported as `None`/`false`, never as an error.

use crate::ast::{Binding, NodeId, NodeKind, SyntaxTree};

/// Name of the assertion helper whose first argument counts as a guard.
pub const INVARIANT_FN: &str = "invariant";

/// Operands of the comparison guarding a statement.
///
/// Recognised shapes:
/// - `if (l OP r) ...`
/// - `const x = l OP r ? a : b` (first declarator only)
/// - `invariant(l OP r, msg)` as a bare statement
pub fn extract_comparison_operands(tree: &SyntaxTree, stmt: NodeId) -> Option<(NodeId, NodeId)> {
    match tree.kind(stmt) {
        NodeKind::IfStatement { test, .. } => binary_operands(tree, *test),
        NodeKind::VariableDeclaration { declarators, .. } => {
            let first = *declarators.first()?;
            let NodeKind::VariableDeclarator { init: Some(init), .. } = tree.kind(first) else {
                return None;
            };
            match tree.kind(*init) {
                NodeKind::Conditional { test, .. } => binary_operands(tree, *test),
                _ => None,
            }
        }
        NodeKind::ExpressionStatement { expression } => invariant_operands(tree, *expression),
        _ => None,
    }
}

fn binary_operands(tree: &SyntaxTree, node: NodeId) -> Option<(NodeId, NodeId)> {
    match tree.kind(node) {
        NodeKind::Binary { left, right, .. } => Some((*left, *right)),
        _ => None,
    }
}

fn invariant_operands(tree: &SyntaxTree, expr: NodeId) -> Option<(NodeId, NodeId)> {
    let NodeKind::Call { callee, arguments } = tree.kind(expr) else {
        return None;
    };
    if tree.identifier_name(*callee) != Some(INVARIANT_FN) || arguments.len() != 2 {
        return None;
    }
    binary_operands(tree, arguments[0])
}

/// True iff `node` is syntactically `object_name.property_name`.
pub fn is_property_access_of(
    tree: &SyntaxTree,
    node: NodeId,
    object_name: &str,
    property_name: &str,
) -> bool {
    match tree.kind(node) {
        NodeKind::MemberAccess { object, property } => {
            property == property_name && tree.identifier_name(*object) == Some(object_name)
        }
        _ => false,
    }
}

/// Name bound by a variable declarator with a plain identifier target.
pub fn binding_name(tree: &SyntaxTree, node: NodeId) -> Option<&str> {
    match tree.kind(node) {
        NodeKind::VariableDeclarator {
            binding: Binding::Identifier(name),
            ..
        } => Some(name),
        _ => None,
    }
}

pub fn is_binding_to(tree: &SyntaxTree, node: NodeId, name: &str) -> bool {
    binding_name(tree, node) == Some(name)
}

/// Statements of the nearest enclosing block or program.
///
/// Ascent stops at a function boundary: a node inside a concise arrow body
/// (`() => f()`) has no enclosing statement list of its own.
pub fn enclosing_statement_list(tree: &SyntaxTree, node: NodeId) -> Option<&[NodeId]> {
    for ancestor in tree.ancestors(node) {
        match tree.kind(ancestor) {
            NodeKind::Block { body } | NodeKind::Program { body } => return Some(body),
            NodeKind::Function { .. } => return None,
            _ => {}
        }
    }
    None
}

/// First declarator binding `name` among `statements`.
pub fn find_binding_declarator(
    tree: &SyntaxTree,
    statements: &[NodeId],
    name: &str,
) -> Option<NodeId> {
    statements.iter().find_map(|&stmt| match tree.kind(stmt) {
        NodeKind::VariableDeclaration { declarators, .. } => declarators
            .iter()
            .copied()
            .find(|&d| is_binding_to(tree, d, name)),
        _ => None,
    })
}

/// True iff `call` is `Result.<method>(...)` for one of `methods`.
pub fn is_member_call_on(tree: &SyntaxTree, call: NodeId, object: &str, methods: &[&str]) -> bool {
    match tree.kind(call) {
        NodeKind::Call { callee, .. } => methods
            .iter()
            .any(|m| is_property_access_of(tree, *callee, object, m)),
        _ => false,
    }
}

/// Arguments of a call node, empty for anything else.
pub fn call_arguments(tree: &SyntaxTree, call: NodeId) -> &[NodeId] {
    match tree.kind(call) {
        NodeKind::Call { arguments, .. } => arguments,
        _ => &[],
    }
}
