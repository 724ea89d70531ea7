//! Core data structures for Duet.
//!
//! - Module identifiers and artifacts (what the resolver maps)
//! - Platform targets (the closed set a build selects from)
//! - Manifests and workspaces

pub mod artifact;
pub mod manifest;
pub mod module_id;
pub mod platform;
pub mod workspace;

pub use artifact::{Artifact, Variant};
pub use manifest::{Manifest, MANIFEST_NAME};
pub use module_id::ModuleIdentifier;
pub use platform::{PlatformDef, PlatformError, PlatformSet, PlatformTarget};
pub use workspace::{find_manifest, ManifestError, Workspace};
