use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// ts-clippy CLI options.
#[derive(Debug, Parser)]
#[command(
    name = "ts-clippy",
    version,
    about = "Lint TypeScript for reference comparisons and dropped Results",
    args_conflicts_with_subcommands = true,
    subcommand_precedence_over_arg = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub lint: LintArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Lint files or directories.
    Lint(LintArgs),

    /// List available lints.
    ListRules,

    /// Explain a lint.
    Explain {
        /// Lint rule name.
        rule: String,
    },
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LintArgs {
    /// Files/directories to lint. Defaults to stdin when absent.
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,

    /// Only run these lints (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Skip these lints (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Path to a `ts-clippy.toml`. Otherwise searched upwards from the first path.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable preview lints.
    #[arg(long)]
    pub preview: bool,

    /// Do not infer types; type-based lints are skipped.
    #[arg(long)]
    pub no_types: bool,

    /// Exit with code 1 if any diagnostics are emitted.
    #[arg(long)]
    pub deny_warnings: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
    Github,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_paths_lint_without_subcommand() {
        let args = Args::parse_from(["ts-clippy", "src", "--only", "a,b", "--no-types"]);
        assert!(args.command.is_none());
        assert_eq!(args.lint.paths, [PathBuf::from("src")]);
        assert_eq!(args.lint.only, ["a", "b"]);
        assert!(args.lint.no_types);
        assert_eq!(args.lint.format, OutputFormat::Pretty);
    }

    #[test]
    fn subcommands_parse() {
        let args = Args::parse_from(["ts-clippy", "explain", "result_handling"]);
        assert!(matches!(args.command, Some(Command::Explain { rule }) if rule == "result_handling"));

        let args = Args::parse_from(["ts-clippy", "lint", "--format", "json", "a.ts"]);
        let Some(Command::Lint(lint)) = args.command else {
            panic!("expected lint subcommand");
        };
        assert_eq!(lint.format, OutputFormat::Json);
    }
}
