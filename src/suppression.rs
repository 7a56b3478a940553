use crate::annotations::FileDirectives;
use crate::lint::LintDescriptor;

/// Helpers for honoring `ts-clippy-*` comment directives.
///
/// A finding is anchored at the line its node starts on, matching how
/// `eslint-disable-next-line` treats report locations.
fn matches_scope(lint: &LintDescriptor, mut hit: impl FnMut(&str) -> bool) -> bool {
    hit(lint.name) || hit(lint.category.as_str())
}

/// Whether `lint` is suppressed at `line`, by a line directive or file-wide.
pub fn is_suppressed(directives: &FileDirectives, line: usize, lint: &LintDescriptor) -> bool {
    is_file_suppressed(directives, lint)
        || directives
            .line_scope(line)
            .is_some_and(|scope| matches_scope(lint, |n| scope.is_suppressed(n)))
}

/// Whether the file carries a `ts-clippy-disable` covering `lint`.
///
/// A matching `ts-clippy-deny` wins over a file-wide disable.
pub fn is_file_suppressed(directives: &FileDirectives, lint: &LintDescriptor) -> bool {
    let scope = directives.file_scope();
    matches_scope(lint, |n| scope.is_suppressed(n)) && !is_denied(directives, lint)
}

/// Whether the file carries a `ts-clippy-deny` covering `lint`.
pub fn is_denied(directives: &FileDirectives, lint: &LintDescriptor) -> bool {
    let scope = directives.file_scope();
    matches_scope(lint, |n| scope.is_denied(n))
}
