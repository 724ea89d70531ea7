//! Package-tree fixtures.
//!
//! A [`TreeFixture`] describes a package listing without touching the
//! filesystem; `write_to` materializes it (with a manifest) for tests that
//! go through the scanner or the ops layer.

use std::path::{Path, PathBuf};

use crate::core::{Manifest, PlatformSet, MANIFEST_NAME};
use crate::resolver::VariantMapping;
use crate::sources::{PackageTree, SourceFile};

/// In-memory description of a package's source files.
#[derive(Debug, Clone, Default)]
pub struct TreeFixture {
    files: Vec<SourceFile>,
}

impl TreeFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// The default extension list, as owned strings.
    pub fn extensions() -> Vec<String> {
        ["tsx", "ts", "jsx", "js"].iter().map(|s| s.to_string()).collect()
    }

    /// Add a file under `src`.
    pub fn file(self, relative: &str) -> Self {
        self.file_in("src", relative)
    }

    /// Add a file under another source root.
    pub fn file_in(mut self, root: &str, relative: &str) -> Self {
        self.files.push(SourceFile::new(root, relative));
        self
    }

    pub fn tree(&self) -> PackageTree {
        PackageTree::from_files(self.files.iter().cloned())
    }

    pub fn mapping(&self, platforms: &PlatformSet) -> VariantMapping {
        VariantMapping::build(&self.tree(), platforms, &Self::extensions())
    }

    /// Write the default manifest and every file (with placeholder content)
    /// under `dir`. Returns the manifest path.
    pub fn write_to(&self, dir: &Path) -> PathBuf {
        let manifest = dir.join(MANIFEST_NAME);
        std::fs::write(&manifest, Manifest::template("fixture")).expect("failed to write manifest");

        for file in &self.files {
            let path = dir.join(file.package_path());
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).expect("failed to create source dir");
            }
            std::fs::write(&path, "export {};\n").expect("failed to write source file");
        }

        manifest
    }
}
