//! Duet.toml manifest parsing and schema.
//!
//! The manifest names the package, says where shared sources live and which
//! extensions count as artifacts, and declares the closed set of platforms.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::platform::{default_platforms, PlatformDef, PlatformError, PlatformSet};

/// Manifest file name.
pub const MANIFEST_NAME: &str = "Duet.toml";

/// Parsed `Duet.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub package: PackageMeta,

    #[serde(default)]
    pub resolve: ResolveSettings,

    /// `[[platform]]` entries; empty means the built-in set
    #[serde(default, rename = "platform", skip_serializing_if = "Vec::is_empty")]
    pub platforms: Vec<PlatformDef>,
}

/// `[package]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageMeta {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// `[resolve]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveSettings {
    /// Source roots scanned for artifacts, relative to the manifest
    pub roots: Vec<String>,

    /// File extensions that are artifacts (without the dot)
    pub extensions: Vec<String>,

    /// Glob patterns (relative to the package root) excluded from scanning
    pub exclude: Vec<String>,
}

impl Default for ResolveSettings {
    fn default() -> Self {
        ResolveSettings {
            roots: vec!["src".to_string()],
            extensions: ["tsx", "ts", "jsx", "js"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            exclude: vec!["**/node_modules/**".to_string()],
        }
    }
}

impl Manifest {
    /// Load a manifest from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("invalid manifest: {}", path.display()))
    }

    /// Parse and validate manifest content.
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Manifest =
            toml::from_str(content).with_context(|| format!("failed to parse {}", MANIFEST_NAME))?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<()> {
        if self.package.name.trim().is_empty() {
            bail!("package name must not be empty");
        }
        if self.resolve.roots.is_empty() {
            bail!("[resolve] roots must list at least one source directory");
        }
        for root in &self.resolve.roots {
            if Path::new(root).is_absolute() {
                bail!("source root `{}` must be relative to the manifest", root);
            }
        }
        if self.resolve.extensions.is_empty() {
            bail!("[resolve] extensions must list at least one extension");
        }
        for ext in &self.resolve.extensions {
            if ext.is_empty() || ext.contains('.') {
                bail!("extension `{}` must be non-empty and written without dots", ext);
            }
        }
        for pattern in &self.resolve.exclude {
            glob::Pattern::new(pattern)
                .with_context(|| format!("invalid exclude pattern `{}`", pattern))?;
        }

        self.platform_set()?;
        Ok(())
    }

    /// The validated platform set declared by this manifest.
    pub fn platform_set(&self) -> Result<PlatformSet, PlatformError> {
        let platforms = if self.platforms.is_empty() {
            default_platforms()
        } else {
            self.platforms.clone()
        };
        PlatformSet::new(platforms, &self.resolve.extensions)
    }

    /// Manifest text written by `duet init`.
    pub fn template(name: &str) -> String {
        format!(
            r#"[package]
name = "{name}"

[resolve]
roots = ["src"]
extensions = ["tsx", "ts", "jsx", "js"]
exclude = ["**/node_modules/**"]

[[platform]]
name = "web"
suffix = "web"

[[platform]]
name = "native"
suffix = "native"

[[platform]]
name = "native-ios"
suffix = "ios"
parent = "native"

[[platform]]
name = "native-android"
suffix = "android"
parent = "native"
"#
        )
    }
}
