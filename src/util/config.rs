//! Configuration file support for Duet.
//!
//! Duet supports two configuration file locations:
//! - Global: `~/.duet/config.toml` - User-wide defaults
//! - Project: `.duet/config.toml` - Package-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Duet configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub resolve: ResolveConfig,
    pub term: TermConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ResolveConfig {
    /// Target used by `resolve` and `plan` when `--target` is omitted
    pub default_target: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TermConfig {
    /// Force colored output on or off
    pub color: Option<bool>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file is missing or
    /// broken.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.resolve.default_target.is_some() {
            self.resolve.default_target = other.resolve.default_target;
        }
        if other.term.color.is_some() {
            self.term.color = other.term.color;
        }
    }
}

/// `.duet/config.toml` under a package root.
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".duet").join("config.toml")
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.duet/config.toml)
/// 2. Global config (~/.duet/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        config.merge(Config::load_or_default(global_path));
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(
            &config_path,
            r#"
[resolve]
default-target = "native-ios"

[term]
color = false
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.resolve.default_target.as_deref(), Some("native-ios"));
        assert_eq!(config.term.color, Some(false));
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.resolve.default_target = Some("web".to_string());
        base.term.color = Some(true);

        let mut project = Config::default();
        project.resolve.default_target = Some("native".to_string());

        base.merge(project);
        assert_eq!(base.resolve.default_target.as_deref(), Some("native"));
        assert_eq!(base.term.color, Some(true));
    }

    #[test]
    fn test_broken_config_falls_back() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[resolve\n").unwrap();

        assert!(Config::load(&path).is_err());
        assert_eq!(Config::load_or_default(&path), Config::default());
    }

    #[test]
    fn test_missing_files_give_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("a.toml"), &project_config_path(tmp.path()));
        assert_eq!(config, Config::default());
    }
}
