use clap::Parser;
use itertools::Itertools;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use ts_clippy::LintEngine;
use ts_clippy::cli::{Args, Command, LintArgs, OutputFormat};
use ts_clippy::config;
use ts_clippy::diagnostics::{Diagnostic, JsonDiagnostic};
use ts_clippy::level::LintLevel;
use ts_clippy::lint::{LINT_ALIASES, LintRegistry, LintSettings, resolve_lint_alias};
use ts_clippy::parser::Dialect;
use walkdir::WalkDir;

const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts"];
const SKIPPED_DIRS: &[&str] = &["node_modules", ".git", "target", "dist"];

fn main() -> ExitCode {
    ts_clippy::telemetry::init_tracing();
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::from(2)
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    match args.command {
        Some(Command::ListRules) => {
            list_rules();
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Explain { rule }) => {
            explain_rule(&rule)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Lint(lint)) => lint_command(lint),
        None => lint_command(args.lint),
    }
}

fn list_rules() {
    let registry = LintRegistry::default_rules();
    let rules = registry.descriptors().sorted_by_key(|d| d.name);

    for d in rules {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            d.name,
            d.category.as_str(),
            d.group.as_str(),
            d.analysis.as_str(),
            d.description
        );
    }
}

fn explain_rule(rule: &str) -> anyhow::Result<()> {
    let canonical = resolve_lint_alias(rule);
    let Some(d) = LintRegistry::default_rules().find_descriptor(canonical) else {
        anyhow::bail!("unknown lint: {rule}");
    };

    println!("name: {}", d.name);
    println!("category: {}", d.category.as_str());
    println!("group: {}", d.group.as_str());
    if let Some(flag) = d.group.required_flag() {
        println!("enable with: {flag}");
    }
    println!("analysis: {}", d.analysis.as_str());
    println!("description: {}", d.description);

    let aliases = LINT_ALIASES
        .iter()
        .filter(|(_, canonical)| *canonical == d.name)
        .map(|(alias, _)| *alias)
        .join(", ");
    if !aliases.is_empty() {
        println!("aliases: {aliases}");
    }
    Ok(())
}

fn lint_command(args: LintArgs) -> anyhow::Result<ExitCode> {
    let start_dir = infer_start_dir(&args)?;
    let loaded_cfg = config::load_config(args.config.as_deref(), &start_dir)?;

    let (disabled, settings, preview) = match loaded_cfg.as_ref() {
        Some((_path, cfg)) => (
            cfg.lints.disabled.clone(),
            LintSettings::default()
                .with_config_levels(cfg.lints.levels()?)
                .disable(cfg.lints.disabled.clone()),
            // CLI flag takes precedence over config
            args.preview || cfg.lints.preview,
        ),
        None => (Vec::new(), LintSettings::default(), args.preview),
    };

    let registry =
        LintRegistry::default_rules_filtered(&args.only, &args.skip, &disabled, preview)?;
    let mut engine = LintEngine::new_with_settings(registry, settings);
    if args.no_types {
        engine = engine.without_types();
    }

    let inputs = if args.paths.is_empty() {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        vec![("stdin".to_string(), Dialect::TypeScript, source)]
    } else {
        collect_source_files(&args.paths)?
            .into_iter()
            .map(|path| {
                let source = std::fs::read_to_string(&path)
                    .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
                Ok((path.display().to_string(), Dialect::for_path(&path), source))
            })
            .collect::<anyhow::Result<Vec<_>>>()?
    };

    let mut all: Vec<(String, Diagnostic)> = Vec::new();
    for (file, dialect, source) in &inputs {
        tracing::debug!(file = file.as_str(), "linting");
        let diagnostics = engine.lint_source_with_dialect(source, *dialect)?;
        all.extend(diagnostics.into_iter().map(|d| (file.clone(), d)));
    }

    let has_error = all.iter().any(|(_, d)| d.level == LintLevel::Error);
    match args.format {
        OutputFormat::Json => print_json(&all)?,
        OutputFormat::Pretty => {
            for (file, diag) in &all {
                println!("{}", format_pretty(file, diag));
            }
            println!("{} diagnostics in {} files", all.len(), inputs.len());
        }
        OutputFormat::Github => {
            for (file, diag) in &all {
                println!("{}", format_github(file, diag, args.deny_warnings));
            }
        }
    }

    if has_error || (args.deny_warnings && !all.is_empty()) {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn print_json(all: &[(String, Diagnostic)]) -> anyhow::Result<()> {
    let out: Vec<JsonDiagnostic> = all
        .iter()
        .map(|(file, d)| d.to_json(file))
        .sorted_by(|a, b| {
            (a.file.as_str(), a.row, a.column, a.lint.as_str())
                .cmp(&(b.file.as_str(), b.row, b.column, b.lint.as_str()))
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn format_pretty(file: &str, diag: &Diagnostic) -> String {
    format!(
        "{}:{}:{}: {}: {}: {}",
        file,
        diag.span.start.row,
        diag.span.start.column,
        diag.level.as_str(),
        diag.lint.name,
        diag.message
    )
}

fn format_github(file: &str, diag: &Diagnostic, deny_warnings: bool) -> String {
    let kind = if diag.level == LintLevel::Error || deny_warnings {
        "error"
    } else {
        "warning"
    };
    format!(
        "::{} file={},line={},col={},title={}::{}",
        kind,
        github_escape(file),
        diag.span.start.row,
        diag.span.start.column,
        diag.lint.name,
        github_escape(&diag.message)
    )
}

fn github_escape(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn collect_source_files(paths: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for path in paths {
        let meta = std::fs::metadata(path)
            .map_err(|e| anyhow::anyhow!("cannot access {}: {e}", path.display()))?;
        if !meta.is_dir() {
            out.push(path.clone());
            continue;
        }
        let walker = WalkDir::new(path)
            .into_iter()
            .filter_entry(|e| !(e.file_type().is_dir() && e.depth() > 0 && should_skip_dir(e.path())));
        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_file() && is_source_file(entry.path()) {
                out.push(entry.into_path());
            }
        }
    }

    out.sort();
    out.dedup();
    Ok(out)
}

fn is_source_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or_default();
    if name.ends_with(".d.ts") {
        return false;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

fn should_skip_dir(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
        return false;
    };

    SKIPPED_DIRS.contains(&name)
}

fn infer_start_dir(args: &LintArgs) -> anyhow::Result<PathBuf> {
    let base = if let Some(p) = args.paths.first() {
        p.clone()
    } else {
        std::env::current_dir()?
    };

    let base = if base.is_file() {
        base.parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    } else {
        base
    };

    Ok(base)
}
