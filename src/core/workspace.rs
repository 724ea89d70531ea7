//! Workspace - the package root, its manifest and platform set.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use crate::core::manifest::{Manifest, MANIFEST_NAME};
use crate::core::platform::PlatformSet;

/// Error locating the manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("could not find {} in {} or any parent directory", MANIFEST_NAME, .dir.display())]
    NotFound { dir: PathBuf },
}

/// Find `Duet.toml` in `start` or any of its ancestors.
pub fn find_manifest(start: &Path) -> Result<PathBuf, ManifestError> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(MANIFEST_NAME);
        if candidate.is_file() {
            return Ok(candidate);
        }
        if !current.pop() {
            return Err(ManifestError::NotFound {
                dir: start.to_path_buf(),
            });
        }
    }
}

/// A loaded package with its validated configuration.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    manifest: Manifest,
    platforms: PlatformSet,
}

impl Workspace {
    /// Load a workspace from a manifest path.
    pub fn load(manifest_path: &Path) -> Result<Self> {
        let manifest = Manifest::load(manifest_path)?;
        let root = manifest_path
            .parent()
            .unwrap_or(Path::new("."))
            .to_path_buf();
        Self::from_manifest(root, manifest)
    }

    /// Build a workspace from an already-parsed manifest.
    pub fn from_manifest(root: PathBuf, manifest: Manifest) -> Result<Self> {
        let platforms = manifest
            .platform_set()
            .with_context(|| format!("invalid platforms in {}", MANIFEST_NAME))?;

        Ok(Workspace {
            root,
            manifest,
            platforms,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn name(&self) -> &str {
        &self.manifest.package.name
    }

    pub fn platforms(&self) -> &PlatformSet {
        &self.platforms
    }

    pub fn extensions(&self) -> &[String] {
        &self.manifest.resolve.extensions
    }

    pub fn exclude(&self) -> &[String] {
        &self.manifest.resolve.exclude
    }
}
