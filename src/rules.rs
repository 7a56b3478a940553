pub mod non_primitive_eq;
pub mod result_handling;

use crate::ast::NodeId;
use crate::lint::{LintDescriptor, LintRegistry};

pub use non_primitive_eq::{NON_PRIMITIVE_EQ, NonPrimitiveEqLint};
pub use result_handling::{RESULT_HANDLING, ResultHandlingLint};

/// Descriptors of every built-in rule, in registration order.
pub static BUILTIN_DESCRIPTORS: &[&LintDescriptor] = &[&NON_PRIMITIVE_EQ, &RESULT_HANDLING];

pub fn builtin_registry() -> LintRegistry {
    LintRegistry::new()
        .with_rule(NonPrimitiveEqLint)
        .with_rule(ResultHandlingLint)
}

/// What a detector found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FindingKind {
    NonPrimitiveEquality,
    UnhandledResult,
}

impl FindingKind {
    pub fn message(&self) -> &'static str {
        match self {
            FindingKind::NonPrimitiveEquality => {
                "Avoid equality comparison between non-primitive values; compare primitive fields or identity-safe representations instead."
            }
            FindingKind::UnhandledResult => {
                "All Result-typed outcomes must be unwrapped, discriminant-checked, or propagated via return."
            }
        }
    }
}

/// Detector output, handed straight to the reporting sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Finding {
    pub node: NodeId,
    pub kind: FindingKind,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptors_match_registry_order() {
        let names: Vec<_> = BUILTIN_DESCRIPTORS.iter().map(|d| d.name).collect();
        let registered: Vec<_> = builtin_registry().descriptors().map(|d| d.name).collect();
        assert_eq!(names, registered);
    }

    #[test]
    fn finding_messages_are_distinct() {
        assert_ne!(
            FindingKind::NonPrimitiveEquality.message(),
            FindingKind::UnhandledResult.message()
        );
        assert!(FindingKind::UnhandledResult.message().contains("Result-typed"));
    }
}
