//! Package-tree scanning.
//!
//! Produces the sorted file listing the resolver consumes. Resolution is a
//! pure function of this listing, so scanning is the only step that touches
//! the filesystem.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::Pattern;
use walkdir::WalkDir;

use crate::core::Workspace;
use crate::util::fs::to_slash;
use crate::util::hash::Fingerprint;

/// A file found under one of the package's source roots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceFile {
    /// Source root, relative to the package root (e.g. `src`)
    pub root: PathBuf,

    /// Path relative to the source root
    pub relative: PathBuf,
}

impl SourceFile {
    pub fn new(root: impl Into<PathBuf>, relative: impl Into<PathBuf>) -> Self {
        SourceFile {
            root: root.into(),
            relative: relative.into(),
        }
    }

    /// Path relative to the package root.
    pub fn package_path(&self) -> PathBuf {
        self.root.join(&self.relative)
    }
}

/// Sorted, de-duplicated listing of source files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageTree {
    files: Vec<SourceFile>,
}

impl PackageTree {
    /// Build a listing from already-known files, in any order.
    pub fn from_files(files: impl IntoIterator<Item = SourceFile>) -> Self {
        let mut files: Vec<_> = files.into_iter().collect();
        files.sort();
        files.dedup();
        PackageTree { files }
    }

    /// Scan the workspace's configured source roots.
    pub fn scan(ws: &Workspace) -> Result<Self> {
        Self::scan_roots(ws.root(), &ws.manifest().resolve.roots, ws.exclude())
    }

    /// Scan `roots` (relative to `package_root`), skipping excluded paths.
    ///
    /// Exclude patterns match against the `/`-separated package-relative path.
    /// A directory matching a pattern, or the prefix of a pattern ending in
    /// `/**`, is not descended into. Missing roots and unreadable entries are
    /// skipped with a warning.
    pub fn scan_roots(package_root: &Path, roots: &[String], exclude: &[String]) -> Result<Self> {
        let compile = |p: &str| Pattern::new(p).with_context(|| format!("invalid exclude pattern `{}`", p));
        let patterns = exclude.iter().map(|p| compile(p)).collect::<Result<Vec<_>>>()?;
        let dir_patterns = exclude
            .iter()
            .filter_map(|p| p.strip_suffix("/**"))
            .map(compile)
            .collect::<Result<Vec<_>>>()?;

        let mut files = Vec::new();

        for root in roots {
            let root_rel = PathBuf::from(root);
            let root_abs = package_root.join(&root_rel);

            if !root_abs.is_dir() {
                tracing::warn!("source root `{}` does not exist, skipping", root);
                continue;
            }

            let walker = WalkDir::new(&root_abs)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|entry| {
                    if entry.depth() == 0 || !entry.file_type().is_dir() {
                        return true;
                    }
                    let Ok(relative) = entry.path().strip_prefix(&root_abs) else {
                        return true;
                    };
                    let dir = to_slash(&root_rel.join(relative));
                    let pruned = patterns.iter().chain(&dir_patterns).any(|p| p.matches(&dir));
                    if pruned {
                        tracing::trace!("excluded {}/", dir);
                    }
                    !pruned
                });

            for entry in walker {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => {
                        tracing::warn!("skipping unreadable entry under {}: {}", root_abs.display(), err);
                        continue;
                    }
                };

                if !entry.file_type().is_file() {
                    continue;
                }

                let relative = match entry.path().strip_prefix(&root_abs) {
                    Ok(rel) => rel.to_path_buf(),
                    Err(_) => continue,
                };

                let package_path = to_slash(&root_rel.join(&relative));
                if patterns.iter().any(|p| p.matches(&package_path)) {
                    tracing::trace!("excluded {}", package_path);
                    continue;
                }

                files.push(SourceFile::new(root_rel.clone(), relative));
            }
        }

        tracing::debug!("scanned {} files under {} root(s)", files.len(), roots.len());
        Ok(Self::from_files(files))
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Feed the listing into a fingerprint.
    pub fn fingerprint_into(&self, fp: &mut Fingerprint) {
        for file in &self.files {
            fp.update_str(&to_slash(&file.package_path()));
        }
    }
}
