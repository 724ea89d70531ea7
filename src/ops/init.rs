//! Implementation of `duet init`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::core::{Manifest, MANIFEST_NAME};
use crate::util::fs::{ensure_dir, write_string};

#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Package name
    pub name: String,
}

/// Write a default `Duet.toml` and source root into `path`.
///
/// Returns the manifest path.
pub fn init_package(path: &Path, opts: &InitOptions) -> Result<PathBuf> {
    let manifest_path = path.join(MANIFEST_NAME);
    if manifest_path.exists() {
        bail!("`{}` already exists in `{}`", MANIFEST_NAME, path.display());
    }

    let content = Manifest::template(&opts.name);
    let manifest = Manifest::parse(&content)?;

    ensure_dir(path)?;
    write_string(&manifest_path, &content)?;

    for root in &manifest.resolve.roots {
        ensure_dir(&path.join(root))?;
    }

    let gitignore = path.join(".gitignore");
    if !gitignore.exists() {
        write_string(&gitignore, "# Duet local state\n.duet/\n")?;
    }

    tracing::debug!("initialized `{}` at {}", opts.name, path.display());
    Ok(manifest_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Workspace;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_loadable_package() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("shared-ui");

        let manifest = init_package(
            &dir,
            &InitOptions {
                name: "shared-ui".to_string(),
            },
        )
        .unwrap();

        assert!(dir.join("src").is_dir());
        assert!(dir.join(".gitignore").is_file());
        let ws = Workspace::load(&manifest).unwrap();
        assert_eq!(ws.name(), "shared-ui");
        assert_eq!(ws.platforms().len(), 4);
    }

    #[test]
    fn test_init_refuses_existing_manifest() {
        let tmp = TempDir::new().unwrap();
        let opts = InitOptions {
            name: "app".to_string(),
        };
        init_package(tmp.path(), &opts).unwrap();

        let err = init_package(tmp.path(), &opts).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
