use crate::error::{ClippyResult, TsClippyError};
use crate::level::LintLevel;
use crate::lint::all_known_lints_with_aliases;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
pub struct TsClippyConfig {
    #[serde(default)]
    pub lints: LintsConfig,
}

/// The `[lints]` table: `disabled`, `preview`, and `<lint> = "<level>"` pairs.
#[derive(Debug, Default, Deserialize)]
pub struct LintsConfig {
    #[serde(default)]
    pub disabled: Vec<String>,

    #[serde(default)]
    pub preview: bool,

    #[serde(flatten)]
    pub levels: HashMap<String, String>,
}

impl LintsConfig {
    /// Per-lint levels, rejecting unknown lint names and level spellings.
    pub fn levels(&self) -> ClippyResult<HashMap<String, LintLevel>> {
        let known = all_known_lints_with_aliases();
        let mut out = HashMap::with_capacity(self.levels.len());
        for (name, raw) in &self.levels {
            if !known.contains(name.as_str()) {
                return Err(TsClippyError::config(format!("unknown lint `{name}`")));
            }
            let level = LintLevel::parse(raw).ok_or_else(|| {
                TsClippyError::config(format!("invalid level `{raw}` for lint `{name}`"))
            })?;
            out.insert(name.clone(), level);
        }
        Ok(out)
    }
}

pub const DEFAULT_CONFIG_FILE_NAME: &str = "ts-clippy.toml";

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut cur = Some(start_dir);
    while let Some(dir) = cur {
        let candidate = dir.join(DEFAULT_CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        cur = dir.parent();
    }
    None
}

pub fn load_config_file(path: &Path) -> Result<TsClippyConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let cfg: TsClippyConfig = toml::from_str(&raw)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;
    cfg.lints
        .levels()
        .with_context(|| format!("invalid config file: {}", path.display()))?;
    Ok(cfg)
}

pub fn load_config(
    explicit_path: Option<&Path>,
    start_dir: &Path,
) -> Result<Option<(PathBuf, TsClippyConfig)>> {
    if let Some(p) = explicit_path {
        let cfg = load_config_file(p)?;
        return Ok(Some((p.to_path_buf(), cfg)));
    }

    let Some(p) = find_config_file(start_dir) else {
        return Ok(None);
    };
    tracing::debug!(path = %p.display(), "using config file");
    let cfg = load_config_file(&p)?;
    Ok(Some((p, cfg)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_accept_aliases_and_eslint_spellings() {
        let cfg: TsClippyConfig = toml::from_str(
            r#"
[lints]
disabled = ["non_primitive_eq"]
preview = true
result-type-handing = "off"
non_primitive_eq = "deny"
"#,
        )
        .expect("valid toml");
        assert!(cfg.lints.preview);
        assert_eq!(cfg.lints.disabled, ["non_primitive_eq"]);
        let levels = cfg.lints.levels().expect("valid levels");
        assert_eq!(levels["result-type-handing"], LintLevel::Allow);
        assert_eq!(levels["non_primitive_eq"], LintLevel::Error);
    }

    #[test]
    fn unknown_lints_and_levels_are_config_errors() {
        let cfg: TsClippyConfig =
            toml::from_str("[lints]\nmystery = \"warn\"\n").expect("valid toml");
        let err = cfg.lints.levels().expect_err("unknown lint");
        assert_eq!(err.to_string(), "config error: unknown lint `mystery`");

        let cfg: TsClippyConfig =
            toml::from_str("[lints]\nresult_handling = \"loud\"\n").expect("valid toml");
        assert!(cfg.lints.levels().is_err());
    }

    #[test]
    fn empty_file_is_default() {
        let cfg: TsClippyConfig = toml::from_str("").expect("valid toml");
        assert!(cfg.lints.disabled.is_empty());
        assert!(!cfg.lints.preview);
        assert!(cfg.lints.levels().expect("levels").is_empty());
    }
}
