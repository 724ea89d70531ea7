//! Artifacts - concrete source files that implement a module identifier.
//!
//! File names follow `<base>[.<suffix>].<ext>`. The extension must be one of
//! the configured source extensions and the suffix, when present, must belong
//! to a configured platform. A dotted segment that is not a known suffix
//! stays part of the base name.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::module_id::ModuleIdentifier;
use crate::core::platform::PlatformSet;

/// Which slot of a module an artifact fills.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "platform")]
pub enum Variant {
    /// No platform suffix; used when nothing more specific exists
    Fallback,
    /// Variant for the named platform
    Platform(String),
}

impl Variant {
    pub fn platform(&self) -> Option<&str> {
        match self {
            Variant::Fallback => None,
            Variant::Platform(name) => Some(name),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Variant::Fallback)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Fallback => f.write_str("fallback"),
            Variant::Platform(name) => f.write_str(name),
        }
    }
}

/// A source file classified against the platform set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Artifact {
    /// Logical module this file implements
    pub identifier: ModuleIdentifier,

    /// Slot it fills
    pub variant: Variant,

    /// Path relative to the package root (e.g. `src/button.web.tsx`)
    pub path: PathBuf,
}

impl Artifact {
    /// Classify a file found under `source_root`.
    ///
    /// `relative` is the path relative to `source_root`; `package_path` is the
    /// same file relative to the package root and is what gets recorded.
    /// Returns `None` for files that are not artifacts.
    pub fn classify(
        relative: &Path,
        package_path: &Path,
        platforms: &PlatformSet,
        extensions: &[String],
    ) -> Option<Artifact> {
        let Some(file_name) = relative.file_name()?.to_str() else {
            tracing::warn!("skipping non-UTF-8 file name {}", package_path.display());
            return None;
        };
        let (stem, ext) = file_name.rsplit_once('.')?;
        if !extensions.iter().any(|e| e == ext) {
            return None;
        }

        let (base, variant) = match stem.rsplit_once('.') {
            Some((base, suffix)) if !base.is_empty() => match platforms.by_suffix(suffix) {
                Some(platform) => (base, Variant::Platform(platform.name.clone())),
                None => (stem, Variant::Fallback),
            },
            _ => (stem, Variant::Fallback),
        };

        if base.is_empty() || base.starts_with('.') {
            return None;
        }

        let mut segments = Vec::new();
        if let Some(parent) = relative.parent() {
            for component in parent.components() {
                match component {
                    Component::Normal(part) => match part.to_str() {
                        Some(part) => segments.push(part.to_string()),
                        None => {
                            tracing::warn!("skipping non-UTF-8 path {}", package_path.display());
                            return None;
                        }
                    },
                    Component::CurDir => {}
                    _ => return None,
                }
            }
        }
        segments.push(base.to_string());

        let identifier = ModuleIdentifier::new(segments.join("/")).ok()?;

        Some(Artifact {
            identifier,
            variant,
            path: package_path.to_path_buf(),
        })
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
