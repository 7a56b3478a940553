//! Core ts-clippy engine and lint registry.
//!
//! The crate lowers TypeScript into an arena [`ast::SyntaxTree`], answers type
//! questions through a [`types::TypeQuery`] capability, and runs the built-in
//! detectors over the tree with a single pre-order walk.

#![allow(clippy::new_without_default)] // LintRegistry::new() requires explicit construction

pub mod annotations;
pub mod ast;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod level;
pub mod lint;
pub mod parser;
pub mod query;
pub mod rules;
pub mod suppression;
pub mod telemetry;
pub mod types;
pub mod visitor;

use anyhow::Result;

use crate::ast::{NodeId, SyntaxTree};
use crate::diagnostics::Diagnostic;
use crate::lint::{LintContext, LintRegistry, LintRule, LintSettings};
use crate::parser::{Dialect, parse_with_dialect};
use crate::types::{LocalTypeOracle, TypeQuery};
use crate::visitor::{TsVisitor, walk_tree};

/// Engine orchestrates linting by parsing source and running registered rules.
pub struct LintEngine {
    registry: LintRegistry,
    settings: LintSettings,
    use_types: bool,
}

impl LintEngine {
    /// Create a new engine with default lint settings.
    pub fn new(registry: LintRegistry) -> Self {
        Self::new_with_settings(registry, LintSettings::default())
    }

    /// Create a new engine with explicit lint settings (e.g. from config).
    pub fn new_with_settings(registry: LintRegistry, settings: LintSettings) -> Self {
        Self {
            registry,
            settings,
            use_types: true,
        }
    }

    /// Run without the built-in type oracle. Type-based rules are skipped.
    #[must_use]
    pub fn without_types(mut self) -> Self {
        self.use_types = false;
        self
    }

    pub fn registry(&self) -> &LintRegistry {
        &self.registry
    }

    /// Lint a single in-memory TypeScript source string.
    pub fn lint_source(&self, source: &str) -> Result<Vec<Diagnostic>> {
        self.lint_source_with_dialect(source, Dialect::TypeScript)
    }

    pub fn lint_source_with_dialect(
        &self,
        source: &str,
        dialect: Dialect,
    ) -> Result<Vec<Diagnostic>> {
        let tree = parse_with_dialect(source, dialect)?;
        if self.use_types {
            let oracle = LocalTypeOracle::new(&tree);
            Ok(self.lint_tree(&tree, source, &oracle))
        } else {
            Ok(self.lint_tree(&tree, source, &types::NoTypeInfo))
        }
    }

    /// Lint an already-lowered tree against a caller-supplied type service.
    pub fn lint_tree(
        &self,
        tree: &SyntaxTree,
        source: &str,
        types: &dyn TypeQuery,
    ) -> Vec<Diagnostic> {
        crate::instrument_block!("lint_tree", {
            let mut ctx = LintContext::new(source, self.settings.clone());
            let rules: Vec<&dyn LintRule> = self
                .registry
                .rules()
                .filter(|rule| {
                    let descriptor = rule.descriptor();
                    let runnable = !descriptor.analysis.requires_types() || types.is_available();
                    if !runnable {
                        tracing::debug!(lint = descriptor.name, "skipping: no type information");
                    }
                    runnable
                })
                .collect();

            let mut dispatch = RuleDispatch { rules, types };
            walk_tree(tree, &mut dispatch, &mut ctx);

            let diagnostics = ctx.into_diagnostics();
            tracing::debug!(count = diagnostics.len(), nodes = tree.len(), "file linted");
            diagnostics
        })
    }
}

/// Fans walker callbacks out to every active rule.
struct RuleDispatch<'a> {
    rules: Vec<&'a dyn LintRule>,
    types: &'a dyn TypeQuery,
}

impl TsVisitor for RuleDispatch<'_> {
    fn visit_comparison(&mut self, tree: &SyntaxTree, node: NodeId, ctx: &mut LintContext) {
        for rule in &self.rules {
            rule.check_comparison(tree, self.types, node, ctx);
        }
    }

    fn visit_call(&mut self, tree: &SyntaxTree, node: NodeId, ctx: &mut LintContext) {
        for rule in &self.rules {
            rule.check_call(tree, self.types, node, ctx);
        }
    }
}

/// Construct a `LintEngine` with every stable built-in lint enabled.
pub fn create_default_engine() -> Result<LintEngine> {
    let registry = LintRegistry::default_rules_filtered(&[], &[], &[], false)?;
    Ok(LintEngine::new(registry))
}
