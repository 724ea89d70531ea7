//! Duet - platform-variant resolution and capability injection for code
//! shared between web and native shells.
//!
//! The resolver maps a logical module identifier plus the active platform
//! target to exactly one artifact in a package tree. The registry lets each
//! host shell bind its own implementations of shared capability interfaces
//! into render scopes, so shared screens stay pure and platform-neutral.

pub mod capabilities;
pub mod core;
pub mod ops;
pub mod registry;
pub mod resolver;
pub mod screen;
pub mod sources;
pub mod util;

/// Test utilities for Duet unit tests.
///
/// Only compiled for tests. Provides package-tree fixtures and recording
/// capability adapters.
#[cfg(test)]
pub mod test_support;

pub use core::{
    artifact::Artifact, manifest::Manifest, module_id::ModuleIdentifier, platform::PlatformSet,
    platform::PlatformTarget, workspace::Workspace,
};

pub use registry::{Capability, HostShell, RegistryError, Scope};
pub use resolver::{BuildPlan, ResolutionError, VariantMapping};
pub use screen::{DataAdapter, Node, Screen};
pub use util::context::GlobalContext;
