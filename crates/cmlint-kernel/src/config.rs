//! Lint configuration.
//!
//! Looked up in order:
//!
//! | Source | Path |
//! |--------|------|
//! | `--config` flag | as given, must exist |
//! | `$CMLINT_CONFIG` | as given, must exist |
//! | XDG config | `$XDG_CONFIG_HOME/cmlint/config.toml`, if present |
//! | Built-in | every rule enabled |
//!
//! ```toml
//! [rules]
//! enable = ["access-specifier"]   # only these run, when set
//! disable = []                    # these never run
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::Deserialize;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "CMLINT_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LintConfig {
    pub rules: RulesConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesConfig {
    /// When set, only these rules run.
    pub enable: Option<Vec<String>>,
    pub disable: Vec<String>,
}

impl RulesConfig {
    /// Whether the rule called `name` should run.
    pub fn allows(&self, name: &str) -> bool {
        let enabled = match &self.enable {
            Some(list) => list.iter().any(|n| n == name),
            None => true,
        };
        enabled && !self.disable.iter().any(|n| n == name)
    }

    /// Every rule name mentioned in the config.
    pub fn mentioned(&self) -> impl Iterator<Item = &str> {
        self.enable
            .iter()
            .flatten()
            .chain(self.disable.iter())
            .map(String::as_str)
    }
}

/// Default config file location.
///
/// `$XDG_CONFIG_HOME/cmlint/config.toml`, or `~/.config/cmlint/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|d| d.config_dir().join("cmlint").join("config.toml"))
}

impl LintConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).context("invalid cmlint configuration")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&source).with_context(|| format!("in {}", path.display()))
    }

    /// Resolve and load the configuration.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "loading config from flag");
            return Self::from_file(path);
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            let path = PathBuf::from(path);
            tracing::debug!(path = %path.display(), "loading config from {CONFIG_ENV}");
            return Self::from_file(&path);
        }

        match default_config_path() {
            Some(path) if path.is_file() => {
                tracing::debug!(path = %path.display(), "loading config from XDG dir");
                Self::from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_config_allows_everything() {
        let config = LintConfig::from_toml_str("").unwrap();
        assert_eq!(config, LintConfig::default());
        assert!(config.rules.allows("access-specifier"));
    }

    #[test]
    fn enable_list_restricts() {
        let config = LintConfig::from_toml_str(
            r#"
[rules]
enable = ["access-specifier"]
"#,
        )
        .unwrap();
        assert!(config.rules.allows("access-specifier"));
        assert!(!config.rules.allows("other"));
    }

    #[test]
    fn disable_wins_over_enable() {
        let config = LintConfig::from_toml_str(
            r#"
[rules]
enable = ["access-specifier"]
disable = ["access-specifier"]
"#,
        )
        .unwrap();
        assert!(!config.rules.allows("access-specifier"));
        assert_eq!(config.rules.mentioned().count(), 2);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(LintConfig::from_toml_str("[rules]\nenabled = []\n").is_err());
        assert!(LintConfig::from_toml_str("[output]\n").is_err());
    }

    #[test]
    fn explicit_path_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[rules]\ndisable = [\"access-specifier\"]").unwrap();

        let config = LintConfig::load(Some(file.path())).unwrap();
        assert!(!config.rules.allows("access-specifier"));
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LintConfig::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}
