use crate::ast::{NodeId, NodeKind, SyntaxTree};
use crate::lint::LintContext;

/// Callbacks fired while walking a [`SyntaxTree`].
pub trait TsVisitor {
    /// Binary node whose operator is `===`, `==`, `!==` or `!=`.
    fn visit_comparison(&mut self, _tree: &SyntaxTree, _node: NodeId, _ctx: &mut LintContext) {}
    fn visit_call(&mut self, _tree: &SyntaxTree, _node: NodeId, _ctx: &mut LintContext) {}
}

/// Pre-order walk from the root, children in source order.
pub fn walk_tree(tree: &SyntaxTree, visitor: &mut impl TsVisitor, ctx: &mut LintContext) {
    let mut stack = vec![tree.root()];
    while let Some(node) = stack.pop() {
        let kind = tree.kind(node);
        match kind {
            NodeKind::Binary { operator, .. } if operator.is_equality() => {
                visitor.visit_comparison(tree, node, ctx)
            }
            NodeKind::Call { .. } => visitor.visit_call(tree, node, ctx),
            _ => {}
        }
        stack.extend(kind.children().into_iter().rev());
    }
}
