//! Global context for Duet operations.
//!
//! Provides centralized access to configuration, paths, and environment.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use directories::BaseDirs;

use crate::core::workspace::{find_manifest, ManifestError};
use crate::util::config::{self, Config};

static HOME_DIR: LazyLock<Option<PathBuf>> =
    LazyLock::new(|| BaseDirs::new().map(|dirs| dirs.home_dir().join(".duet")));

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for user-wide Duet data (~/.duet/)
    home: PathBuf,

    verbose: bool,

    /// Whether to use colors in output
    color: bool,
}

impl GlobalContext {
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::from_parts(cwd, Self::default_home()))
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        Self::from_parts(cwd, Self::default_home())
    }

    fn default_home() -> PathBuf {
        HOME_DIR.clone().unwrap_or_else(|| PathBuf::from(".duet"))
    }

    fn from_parts(cwd: PathBuf, home: PathBuf) -> Self {
        GlobalContext {
            cwd,
            home,
            verbose: false,
            color: true,
        }
    }

    /// Override the home directory (tests, `DUET_HOME`).
    pub fn with_home(mut self, home: PathBuf) -> Self {
        self.home = home;
        self
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// The Duet home directory (~/.duet/).
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn color(&self) -> bool {
        self.color
    }

    /// Find `Duet.toml` starting from cwd and searching upward.
    pub fn find_manifest(&self) -> Result<PathBuf, ManifestError> {
        find_manifest(&self.cwd)
    }

    /// Global config merged with the project config of the enclosing
    /// package, if there is one.
    pub fn load_config(&self) -> Config {
        let project = match self.find_manifest() {
            Ok(manifest) => manifest
                .parent()
                .map(config::project_config_path)
                .unwrap_or_else(|| config::project_config_path(&self.cwd)),
            Err(_) => config::project_config_path(&self.cwd),
        };
        config::load_config(&self.config_path(), &project)
    }
}
