//! Comment directives that control lint behavior in TypeScript source.
//!
//! - `// ts-clippy-disable-next-line name, name` - suppress on the following line
//! - `// ts-clippy-disable-line name` - suppress on the directive's own line
//! - `/* ts-clippy-disable name */` - suppress for the whole file
//! - `// ts-clippy-deny name` - promote to error for the whole file
//!
//! Names may be lint names or category names. An empty list applies to every
//! lint. Text after `--` is a free-form reason and is ignored. Old rule names
//! are resolved through the lint alias table.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;

use crate::lint::resolve_lint_alias;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    DisableNextLine,
    DisableLine,
    Disable,
    Deny,
}

impl DirectiveKind {
    fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "disable-next-line" => Some(DirectiveKind::DisableNextLine),
            "disable-line" => Some(DirectiveKind::DisableLine),
            "disable" => Some(DirectiveKind::Disable),
            "deny" => Some(DirectiveKind::Deny),
            _ => None,
        }
    }
}

/// One parsed directive comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub kind: DirectiveKind,
    /// 1-based line the comment starts on.
    pub line: usize,
    /// Lint or category names; empty means all lints.
    pub names: Vec<String>,
}

fn directive_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?://|/\*)\s*ts-clippy-(disable-next-line|disable-line|disable|deny)\b([^\n]*)")
            .expect("static pattern compiles")
    })
}

fn parse_names(rest: &str) -> Vec<String> {
    let rest = rest.split("*/").next().unwrap_or_default();
    let rest = rest.split("--").next().unwrap_or_default();
    rest.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| resolve_lint_alias(s).to_string())
        .collect()
}

/// Scan every line of `source` for directive comments.
pub fn parse_directives(source: &str) -> Vec<Directive> {
    let pattern = directive_pattern();
    let mut out = Vec::new();
    for (index, line) in source.lines().enumerate() {
        for caps in pattern.captures_iter(line) {
            let Some(kind) = caps.get(1).and_then(|m| DirectiveKind::from_keyword(m.as_str()))
            else {
                continue;
            };
            let names = caps.get(2).map(|m| parse_names(m.as_str())).unwrap_or_default();
            out.push(Directive {
                kind,
                line: index + 1,
                names,
            });
        }
    }
    out
}

/// Set of lint names allowed or denied in one scope.
#[derive(Debug, Default, Clone)]
pub struct SuppressionScope {
    allowed: HashSet<String>,
    denied: HashSet<String>,
    allow_all: bool,
    deny_all: bool,
}

impl SuppressionScope {
    fn allow(&mut self, names: &[String]) {
        if names.is_empty() {
            self.allow_all = true;
        }
        self.allowed.extend(names.iter().cloned());
    }

    fn deny(&mut self, names: &[String]) {
        if names.is_empty() {
            self.deny_all = true;
        }
        self.denied.extend(names.iter().cloned());
    }

    pub fn is_suppressed(&self, name: &str) -> bool {
        self.allow_all || self.allowed.contains(name)
    }

    pub fn is_denied(&self, name: &str) -> bool {
        self.deny_all || self.denied.contains(name)
    }
}

/// All directives of one file, grouped by the scope they apply to.
#[derive(Debug, Default, Clone)]
pub struct FileDirectives {
    file: SuppressionScope,
    lines: HashMap<usize, SuppressionScope>,
}

impl FileDirectives {
    pub fn from_source(source: &str) -> Self {
        let mut out = Self::default();
        for directive in parse_directives(source) {
            match directive.kind {
                DirectiveKind::Disable => out.file.allow(&directive.names),
                DirectiveKind::Deny => out.file.deny(&directive.names),
                DirectiveKind::DisableLine => out
                    .lines
                    .entry(directive.line)
                    .or_default()
                    .allow(&directive.names),
                DirectiveKind::DisableNextLine => out
                    .lines
                    .entry(directive.line + 1)
                    .or_default()
                    .allow(&directive.names),
            }
        }
        out
    }

    pub fn file_scope(&self) -> &SuppressionScope {
        &self.file
    }

    /// Scope for a 1-based source line, if any directive targets it.
    pub fn line_scope(&self, line: usize) -> Option<&SuppressionScope> {
        self.lines.get(&line)
    }
}
