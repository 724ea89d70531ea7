//! Capability registry.
//!
//! Host shells bind platform implementations of shared capability
//! interfaces into scopes; shared code looks them up through the scope it is
//! rendered in. A missing binding is always an error, never a default.

pub mod capability;
pub mod errors;
pub mod scope;
pub mod shell;

pub use capability::{Capability, CapabilityKey};
pub use errors::RegistryError;
pub use scope::Scope;
pub use shell::HostShell;
