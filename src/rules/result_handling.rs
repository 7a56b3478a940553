use crate::ast::{Binding, NodeId, NodeKind, SyntaxTree};
use crate::lint::{LintCategory, LintContext, LintDescriptor, LintRule};
use crate::query;
use crate::rules::{Finding, FindingKind};
use crate::types::{RESULT_TYPE_NAME, TypeQuery, returns_result};

// ============================================================================
// ResultHandlingLint
// ============================================================================

/// Flags calls returning `Result<T, E>` whose value is dropped.
///
/// A Result counts as handled when it is unwrapped, when its `type` field is
/// compared against `"ok"` or `"err"`, or when it is returned to the caller.
pub struct ResultHandlingLint;

pub static RESULT_HANDLING: LintDescriptor = LintDescriptor::stable_type_based(
    "result_handling",
    LintCategory::ErrorHandling,
    "Require Result-typed outcomes to be unwrapped, checked or returned",
);

const CONSTRUCTORS: &[&str] = &["ok", "err"];
const UNWRAP: &[&str] = &["unwrap"];
const DISCRIMINANT_FIELD: &str = "type";
const DISCRIMINANT_VALUES: &[&str] = &["ok", "err"];

impl LintRule for ResultHandlingLint {
    fn descriptor(&self) -> &'static LintDescriptor {
        &RESULT_HANDLING
    }

    fn check_call(
        &self,
        tree: &SyntaxTree,
        types: &dyn TypeQuery,
        node: NodeId,
        ctx: &mut LintContext,
    ) {
        if let Some(finding) = check_call(tree, types, node) {
            ctx.report_finding(&RESULT_HANDLING, tree, finding);
        }
    }
}

fn is_unwrap_call(tree: &SyntaxTree, node: NodeId) -> bool {
    query::is_member_call_on(tree, node, RESULT_TYPE_NAME, UNWRAP)
}

/// Decide one call node.
pub fn check_call(tree: &SyntaxTree, types: &dyn TypeQuery, call: NodeId) -> Option<Finding> {
    if query::is_member_call_on(tree, call, RESULT_TYPE_NAME, CONSTRUCTORS)
        || is_unwrap_call(tree, call)
    {
        return None;
    }
    if !returns_result(types, tree, call) {
        return None;
    }

    let parent = tree.parent(call)?;
    if is_unwrap_call(tree, parent) && query::call_arguments(tree, parent).contains(&call) {
        return None;
    }

    let handled = match tree.kind(parent) {
        NodeKind::VariableDeclarator {
            binding: Binding::Identifier(name),
            init: Some(init),
            ..
        } if *init == call => match is_bound_result_handled(tree, parent, name) {
            Some(handled) => handled,
            None => {
                tracing::trace!(
                    binding = name.as_str(),
                    "no enclosing statement list for Result binding"
                );
                return None;
            }
        },
        NodeKind::ReturnStatement { argument: Some(arg) } => *arg == call,
        _ => false,
    };

    if handled {
        return None;
    }
    tracing::debug!(row = tree.span(call).start.row, "unhandled Result");
    Some(Finding {
        node: call,
        kind: FindingKind::UnhandledResult,
    })
}

/// Whether a later statement in the declarator's block handles `name`.
///
/// `None` when the declaration is not directly in a block or program body,
/// e.g. inside a `for` head.
fn is_bound_result_handled(tree: &SyntaxTree, declarator: NodeId, name: &str) -> Option<bool> {
    let statements = query::enclosing_statement_list(tree, declarator)?;
    let declaration = tree.parent(declarator)?;
    let position = statements.iter().position(|&s| s == declaration)?;
    Some(
        statements[position + 1..]
            .iter()
            .any(|&stmt| handles_binding(tree, stmt, name)),
    )
}

fn handles_binding(tree: &SyntaxTree, stmt: NodeId, name: &str) -> bool {
    unwraps_binding(tree, stmt, name)
        || checks_discriminant(tree, stmt, name)
        || returns_binding(tree, stmt, name)
}

/// `Result.unwrap(v);` or `const x = Result.unwrap(v);`
fn unwraps_binding(tree: &SyntaxTree, stmt: NodeId, name: &str) -> bool {
    let call = match tree.kind(stmt) {
        NodeKind::ExpressionStatement { expression } => *expression,
        NodeKind::VariableDeclaration { declarators, .. } => {
            let Some(&first) = declarators.first() else {
                return false;
            };
            match tree.kind(first) {
                NodeKind::VariableDeclarator {
                    init: Some(init), ..
                } => *init,
                _ => return false,
            }
        }
        _ => return false,
    };
    is_unwrap_call(tree, call)
        && query::call_arguments(tree, call)
            .first()
            .is_some_and(|&arg| tree.identifier_name(arg) == Some(name))
}

/// `v.type === "ok"` / `"err"` in an if guard, ternary initializer or
/// `invariant(...)` assertion.
fn checks_discriminant(tree: &SyntaxTree, stmt: NodeId, name: &str) -> bool {
    let Some((left, right)) = query::extract_comparison_operands(tree, stmt) else {
        return false;
    };
    query::is_property_access_of(tree, left, name, DISCRIMINANT_FIELD)
        && tree
            .string_literal(right)
            .is_some_and(|value| DISCRIMINANT_VALUES.contains(&value))
}

fn returns_binding(tree: &SyntaxTree, stmt: NodeId, name: &str) -> bool {
    matches!(
        tree.kind(stmt),
        NodeKind::ReturnStatement { argument: Some(arg) } if tree.identifier_name(*arg) == Some(name)
    )
}
