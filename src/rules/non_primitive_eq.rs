use crate::ast::{NodeId, NodeKind, SyntaxTree};
use crate::lint::{LintCategory, LintContext, LintDescriptor, LintRule};
use crate::rules::{Finding, FindingKind};
use crate::types::TypeQuery;

// ============================================================================
// NonPrimitiveEqLint
// ============================================================================

/// Flags `===`/`==`/`!==`/`!=` where an operand is an object, array or class
/// instance. Such comparisons test reference identity, which is almost never
/// what the author meant.
///
/// Comparisons against `null`, `undefined`, `any`, `unknown`, `never` or a
/// union are existence checks and are left alone.
pub struct NonPrimitiveEqLint;

pub static NON_PRIMITIVE_EQ: LintDescriptor = LintDescriptor::stable_type_based(
    "non_primitive_eq",
    LintCategory::Suspicious,
    "Disallow equality comparison between non-primitive values",
);

impl LintRule for NonPrimitiveEqLint {
    fn descriptor(&self) -> &'static LintDescriptor {
        &NON_PRIMITIVE_EQ
    }

    fn check_comparison(
        &self,
        tree: &SyntaxTree,
        types: &dyn TypeQuery,
        node: NodeId,
        ctx: &mut LintContext,
    ) {
        if let Some(finding) = check_comparison(tree, types, node) {
            ctx.report_finding(&NON_PRIMITIVE_EQ, tree, finding);
        }
    }
}

/// Decide one comparison node. `None` means no finding, including when either
/// operand's type is unknown.
pub fn check_comparison(tree: &SyntaxTree, types: &dyn TypeQuery, node: NodeId) -> Option<Finding> {
    let NodeKind::Binary {
        operator,
        left,
        right,
    } = tree.kind(node)
    else {
        return None;
    };
    if !operator.is_equality() {
        return None;
    }

    let (Some(left_ty), Some(right_ty)) = (types.type_of(tree, *left), types.type_of(tree, *right))
    else {
        tracing::trace!(row = tree.span(node).start.row, "comparison operand type inconclusive");
        return None;
    };

    if !left_ty.is_structural() && !right_ty.is_structural() {
        return None;
    }
    if left_ty.is_safe_nullability() || right_ty.is_safe_nullability() {
        return None;
    }

    tracing::debug!(
        left = %left_ty,
        right = %right_ty,
        row = tree.span(node).start.row,
        "non-primitive comparison"
    );
    Some(Finding {
        node,
        kind: FindingKind::NonPrimitiveEquality,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::{FakeTypes, run};
    use crate::types::{NoTypeInfo, PrimitiveKind, TypeDescriptor};

    fn prim(kind: PrimitiveKind) -> TypeDescriptor {
        TypeDescriptor::Primitive(kind)
    }

    fn asset() -> TypeDescriptor {
        TypeDescriptor::named("Asset")
    }

    #[test]
    fn primitive_pairs_are_never_reported() {
        let types = FakeTypes::default()
            .var("n", prim(PrimitiveKind::Number))
            .var("s", prim(PrimitiveKind::String))
            .var("b", prim(PrimitiveKind::Boolean));
        let src = "n === s; n == b; s !== b; n != n;";
        assert!(run(&NonPrimitiveEqLint, &types, src).is_empty());
    }

    #[test]
    fn structural_operands_are_reported_on_the_comparison() {
        let types = FakeTypes::default()
            .var("a", asset())
            .var("b", asset())
            .var("n", prim(PrimitiveKind::Number));
        let src = "a === b;\nn !== a;\nn == n;";
        assert_eq!(run(&NonPrimitiveEqLint, &types, src), [1, 2]);
    }

    #[test]
    fn safe_nullability_on_either_side_suppresses() {
        let types = FakeTypes::default()
            .var("a", asset())
            .var("nothing", prim(PrimitiveKind::Null))
            .var("u", prim(PrimitiveKind::Undefined))
            .var("maybe", TypeDescriptor::union([asset(), prim(PrimitiveKind::Null)]))
            .var("whatever", prim(PrimitiveKind::Any));
        let src = "a === nothing; u !== a; a == maybe; whatever != a;";
        assert!(run(&NonPrimitiveEqLint, &types, src).is_empty());
    }

    #[test]
    fn inconclusive_operands_are_skipped() {
        let types = FakeTypes::default().var("a", asset());
        assert!(run(&NonPrimitiveEqLint, &types, "a === mystery;").is_empty());
        assert!(run(&NonPrimitiveEqLint, &NoTypeInfo, "({}) === ({});").is_empty());
    }

    #[test]
    fn one_finding_per_comparison_in_compound_guards() {
        let types = FakeTypes::default()
            .var("asset", asset())
            .var("other", asset())
            .var("n", prim(PrimitiveKind::Number))
            .var("nothing", prim(PrimitiveKind::Null));
        let src = "if (n === n || asset === other || asset !== nothing) {}";
        assert_eq!(run(&NonPrimitiveEqLint, &types, src), [1]);
    }

    #[test]
    fn printed_types_classify_like_structured_ones() {
        let types = FakeTypes::default()
            .var("a", TypeDescriptor::Text("Asset".into()))
            .var("b", TypeDescriptor::Text("{ id: string }".into()))
            .var("c", TypeDescriptor::Text("Asset | undefined".into()));
        assert_eq!(run(&NonPrimitiveEqLint, &types, "a === b;\na === c;"), [1]);
    }
}
