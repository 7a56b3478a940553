use serde::{Deserialize, Serialize};

/// Severity a lint is reported at. `Allow` drops the diagnostic entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LintLevel {
    Allow,
    Warn,
    Error,
}

impl LintLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LintLevel::Allow => "allow",
            LintLevel::Warn => "warning",
            LintLevel::Error => "error",
        }
    }

    /// Parse the spelling used in config files and directive comments.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "allow" | "off" => Some(LintLevel::Allow),
            "warn" | "warning" => Some(LintLevel::Warn),
            "error" | "deny" => Some(LintLevel::Error),
            _ => None,
        }
    }
}

impl Default for LintLevel {
    fn default() -> Self {
        Self::Warn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_eslint_style_spellings() {
        assert_eq!(LintLevel::parse("off"), Some(LintLevel::Allow));
        assert_eq!(LintLevel::parse(" Warn "), Some(LintLevel::Warn));
        assert_eq!(LintLevel::parse("deny"), Some(LintLevel::Error));
        assert_eq!(LintLevel::parse("loud"), None);
    }

    #[test]
    fn config_level_deserializes_lowercase() {
        #[derive(serde::Deserialize)]
        struct Wrapper {
            level: LintLevel,
        }
        let parsed: Wrapper = toml::from_str("level = \"error\"").expect("valid toml");
        assert_eq!(parsed.level, LintLevel::Error);
    }
}
