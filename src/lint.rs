use crate::annotations::FileDirectives;
use crate::ast::{NodeId, SyntaxTree};
use crate::diagnostics::Diagnostic;
use crate::level::LintLevel;
use crate::rules::Finding;
use crate::suppression;
use crate::types::TypeQuery;
use anyhow::{Result, anyhow};
use std::collections::{HashMap, HashSet};

// ============================================================================
// Rule Groups (Preview vs Stable)
// ============================================================================

/// Classification of lint rules by stability level.
///
/// New rules start in `Preview` and graduate to `Stable` once they have run
/// against real code bases without false positives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub enum RuleGroup {
    /// Enabled by default.
    #[default]
    Stable,

    /// Require `--preview` or `preview = true` in config.
    Preview,
}

impl RuleGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleGroup::Stable => "stable",
            RuleGroup::Preview => "preview",
        }
    }

    /// Returns the CLI flag needed to enable this tier.
    pub fn required_flag(&self) -> Option<&'static str> {
        match self {
            RuleGroup::Stable => None,
            RuleGroup::Preview => Some("--preview"),
        }
    }
}

// ============================================================================
// Analysis Kind Classification
// ============================================================================

/// How a lint examines TypeScript code:
/// - `Syntactic` lints only look at the tree
/// - `TypeBased` lints ask the bound [`TypeQuery`] about node types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub enum AnalysisKind {
    #[default]
    Syntactic,
    /// Skipped when the engine runs without type information.
    TypeBased,
}

impl AnalysisKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisKind::Syntactic => "syntactic",
            AnalysisKind::TypeBased => "type-based",
        }
    }

    pub fn requires_types(&self) -> bool {
        matches!(self, AnalysisKind::TypeBased)
    }
}

// ============================================================================
// Lint Categories
// ============================================================================

/// High-level categories used to group lints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LintCategory {
    /// Code that is very likely wrong, such as comparing references by identity.
    Suspicious,
    /// Values that carry failure and must be looked at.
    ErrorHandling,
}

impl LintCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            LintCategory::Suspicious => "suspicious",
            LintCategory::ErrorHandling => "error_handling",
        }
    }
}

/// Static metadata describing a lint rule.
#[derive(Debug)]
pub struct LintDescriptor {
    pub name: &'static str,
    pub category: LintCategory,
    pub description: &'static str,
    /// Stability group: Stable or Preview.
    pub group: RuleGroup,
    /// Detection method used by this lint.
    pub analysis: AnalysisKind,
}

impl LintDescriptor {
    /// Helper to create a stable type-based lint descriptor.
    pub const fn stable_type_based(
        name: &'static str,
        category: LintCategory,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            category,
            description,
            group: RuleGroup::Stable,
            analysis: AnalysisKind::TypeBased,
        }
    }

    /// Helper to create a preview type-based lint descriptor.
    pub const fn preview_type_based(
        name: &'static str,
        category: LintCategory,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            category,
            description,
            group: RuleGroup::Preview,
            analysis: AnalysisKind::TypeBased,
        }
    }
}

/// A single lint rule, driven by the tree walker.
///
/// Rules are stateless across files: everything file-specific arrives through
/// the arguments.
pub trait LintRule: Send + Sync {
    fn descriptor(&self) -> &'static LintDescriptor;

    /// Called for every `===`, `==`, `!==` and `!=` node.
    fn check_comparison(
        &self,
        _tree: &SyntaxTree,
        _types: &dyn TypeQuery,
        _node: NodeId,
        _ctx: &mut LintContext,
    ) {
    }

    /// Called for every call expression.
    fn check_call(
        &self,
        _tree: &SyntaxTree,
        _types: &dyn TypeQuery,
        _node: NodeId,
        _ctx: &mut LintContext,
    ) {
    }
}

/// Per-lint configuration derived from `ts-clippy.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintSettings {
    levels: HashMap<String, LintLevel>,
}

impl LintSettings {
    #[must_use]
    pub fn with_config_levels(mut self, levels: HashMap<String, LintLevel>) -> Self {
        for (name, level) in levels {
            let canonical = resolve_lint_alias(&name);
            self.levels.insert(canonical.to_string(), level);
        }
        self
    }

    #[must_use]
    pub fn disable(mut self, disabled: impl IntoIterator<Item = String>) -> Self {
        for name in disabled {
            let canonical = resolve_lint_alias(&name);
            self.levels.insert(canonical.to_string(), LintLevel::Allow);
        }
        self
    }

    pub fn level_for(&self, lint_name: &str) -> LintLevel {
        if let Some(&level) = self.levels.get(lint_name) {
            return level;
        }
        let canonical = resolve_lint_alias(lint_name);
        self.levels.get(canonical).copied().unwrap_or_default()
    }
}

/// Level after applying config, then file directives, then line directives.
pub(crate) fn effective_level(
    settings: &LintSettings,
    directives: &FileDirectives,
    lint: &'static LintDescriptor,
    line: usize,
) -> LintLevel {
    let mut level = settings.level_for(lint.name);
    if suppression::is_file_suppressed(directives, lint) {
        level = LintLevel::Allow;
    }
    if suppression::is_denied(directives, lint) {
        level = LintLevel::Error;
    }
    if suppression::is_suppressed(directives, line, lint) {
        level = LintLevel::Allow;
    }
    level
}

/// Mutable context passed to lint rules while traversing a file.
pub struct LintContext {
    settings: LintSettings,
    directives: FileDirectives,
    diagnostics: Vec<Diagnostic>,
}

impl LintContext {
    pub fn new(source: &str, settings: LintSettings) -> Self {
        Self {
            settings,
            directives: FileDirectives::from_source(source),
            diagnostics: Vec::new(),
        }
    }

    /// Turn a detector finding into a diagnostic, honoring config and
    /// directives. Findings at `allow` are dropped.
    pub fn report_finding(
        &mut self,
        lint: &'static LintDescriptor,
        tree: &SyntaxTree,
        finding: Finding,
    ) {
        let span = tree.span(finding.node);
        let level = effective_level(&self.settings, &self.directives, lint, span.start.row);
        if level == LintLevel::Allow {
            tracing::trace!(lint = lint.name, row = span.start.row, "finding suppressed");
            return;
        }

        self.diagnostics.push(Diagnostic {
            lint,
            level,
            file: None,
            span,
            message: finding.kind.message().to_string(),
        });
    }

    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

// ============================================================================
// Lint Name Aliases
// ============================================================================

/// Older rule names, still accepted in config files, CLI flags and directives.
///
/// Format: (old_name, canonical_name)
pub const LINT_ALIASES: &[(&str, &str)] = &[
    ("non-primitives-eq", "non_primitive_eq"),
    ("result-type-handling", "result_handling"),
    // Misspelling shipped in an early release.
    ("result-type-handing", "result_handling"),
];

/// Resolve a lint name to its canonical form.
pub fn resolve_lint_alias(name: &str) -> &str {
    for (alias, canonical) in LINT_ALIASES {
        if *alias == name {
            return canonical;
        }
    }
    name
}

/// Get all known lint names including aliases.
pub fn all_known_lints_with_aliases() -> HashSet<&'static str> {
    let mut known = all_known_lints();
    for (alias, _) in LINT_ALIASES {
        known.insert(alias);
    }
    known
}

pub fn all_known_lints() -> HashSet<&'static str> {
    crate::rules::BUILTIN_DESCRIPTORS
        .iter()
        .map(|d| d.name)
        .collect()
}

/// Registry of lint rules run by the engine.
pub struct LintRegistry {
    rules: Vec<Box<dyn LintRule>>,
}

impl Default for LintRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LintRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    #[must_use]
    pub fn with_rule(mut self, rule: impl LintRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn LintRule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &'static LintDescriptor> + '_ {
        self.rules.iter().map(|r| r.descriptor())
    }

    pub fn find_descriptor(&self, name: &str) -> Option<&'static LintDescriptor> {
        let name = resolve_lint_alias(name);
        self.descriptors().find(|d| d.name == name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Every built-in rule, regardless of group.
    #[must_use = "registry should be used to create an engine"]
    pub fn default_rules() -> Self {
        crate::rules::builtin_registry()
    }

    /// Filter the built-in rules.
    ///
    /// # Errors
    ///
    /// Returns error if any lint name in `only`, `skip`, or `disabled` is unknown.
    pub fn default_rules_filtered(
        only: &[String],
        skip: &[String],
        disabled: &[String],
        preview: bool,
    ) -> Result<Self> {
        Self::default_rules().filtered(only, skip, disabled, preview)
    }

    /// Keep rules selected by `only` (all when empty), minus `skip` and
    /// `disabled`, minus preview rules unless `preview` is set.
    pub fn filtered(
        self,
        only: &[String],
        skip: &[String],
        disabled: &[String],
        preview: bool,
    ) -> Result<Self> {
        let mut known: HashSet<&str> = self.descriptors().map(|d| d.name).collect();
        known.extend(LINT_ALIASES.iter().map(|(alias, _)| *alias));

        for n in only.iter().chain(skip.iter()).chain(disabled.iter()) {
            if !known.contains(n.as_str()) {
                return Err(anyhow!("unknown lint: {n}"));
            }
        }

        let only_set: Option<HashSet<&str>> = if only.is_empty() {
            None
        } else {
            Some(only.iter().map(|s| resolve_lint_alias(s)).collect())
        };
        let skip_set: HashSet<&str> = skip
            .iter()
            .chain(disabled.iter())
            .map(|s| resolve_lint_alias(s))
            .collect();

        let mut reg = Self::new();
        for rule in self.rules {
            let descriptor = rule.descriptor();
            let name = descriptor.name;

            if let Some(ref only) = only_set
                && !only.contains(name)
            {
                continue;
            }
            if skip_set.contains(name) {
                continue;
            }
            if descriptor.group == RuleGroup::Preview && !preview {
                continue;
            }

            reg.rules.push(rule);
        }

        Ok(reg)
    }
}
