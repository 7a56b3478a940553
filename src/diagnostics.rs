use crate::level::LintLevel;
use crate::lint::LintDescriptor;
use serde::Serialize;
use tree_sitter::Range;

/// A single lint finding produced by ts-clippy.
#[derive(Debug, Clone)]
#[must_use]
pub struct Diagnostic {
    pub lint: &'static LintDescriptor,
    pub level: LintLevel,
    pub file: Option<String>,
    pub span: Span,
    pub message: String,
}

/// Span in a TypeScript source file (1-based row/column positions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Single position in a TypeScript source file (1-based row/column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Span {
    /// Construct a `Span` from a tree-sitter range, converting to 1-based positions.
    #[must_use]
    pub fn from_range(range: Range) -> Self {
        Self {
            start: Position {
                row: range.start_point.row + 1,
                column: range.start_point.column + 1,
            },
            end: Position {
                row: range.end_point.row + 1,
                column: range.end_point.column + 1,
            },
        }
    }
}

/// Flat, serializable form used by `--format json`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonDiagnostic {
    pub file: String,
    pub row: usize,
    pub column: usize,
    pub level: String,
    pub lint: String,
    pub message: String,
}

impl Diagnostic {
    pub fn to_json(&self, fallback_file: &str) -> JsonDiagnostic {
        JsonDiagnostic {
            file: self
                .file
                .clone()
                .unwrap_or_else(|| fallback_file.to_string()),
            row: self.span.start.row,
            column: self.span.start.column,
            level: self.level.as_str().to_string(),
            lint: self.lint.name.to_string(),
            message: self.message.clone(),
        }
    }
}
