//! Workspace loading and single-module resolution.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::core::{ModuleIdentifier, Variant, Workspace};
use crate::resolver::VariantMapping;
use crate::sources::PackageTree;
use crate::util::{Config, GlobalContext};

/// Load the workspace enclosing the context's working directory.
pub fn load_workspace(ctx: &GlobalContext) -> Result<Workspace> {
    let manifest_path = ctx.find_manifest()?;
    tracing::debug!("using manifest {}", manifest_path.display());
    Workspace::load(&manifest_path)
}

/// Scan the workspace and build its variant mapping.
pub fn load_mapping(ws: &Workspace) -> Result<VariantMapping> {
    let tree = PackageTree::scan(ws)
        .with_context(|| format!("failed to scan package `{}`", ws.name()))?;
    Ok(VariantMapping::build(&tree, ws.platforms(), ws.extensions()))
}

/// The target to use: an explicit `--target`, else the configured default.
pub fn choose_target(explicit: Option<&str>, config: &Config) -> Result<String> {
    match explicit.or(config.resolve.default_target.as_deref()) {
        Some(target) => Ok(target.to_string()),
        None => bail!(
            "no target given\n\
             help: Pass `--target <platform>` or set `default-target` under [resolve] in .duet/config.toml"
        ),
    }
}

/// The artifact chosen for one identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub identifier: ModuleIdentifier,
    pub target: String,
    pub variant: Variant,
    /// Package-relative artifact path
    pub path: PathBuf,
    pub absolute: PathBuf,
}

/// Resolve `identifier` for `target` in the workspace.
pub fn resolve_module(ws: &Workspace, identifier: &str, target: &str) -> Result<Resolution> {
    let identifier = ModuleIdentifier::new(identifier)?;
    let target = ws.platforms().target(target)?;
    let mapping = load_mapping(ws)?;

    let artifact = mapping.resolve(&identifier, &target)?;
    tracing::debug!("resolved `{}` for `{}` to {}", identifier, target, artifact.path.display());

    Ok(Resolution {
        absolute: ws.root().join(&artifact.path),
        path: artifact.path.clone(),
        variant: artifact.variant.clone(),
        target: target.to_string(),
        identifier,
    })
}
