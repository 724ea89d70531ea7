//! Capability interfaces and their identity.
//!
//! A capability interface is a trait object type (`dyn Router`) that has been
//! given a stable name:
//!
//! ```ignore
//! pub trait Router: Send + Sync {
//!     fn push(&self, path: &str);
//!     fn back(&self);
//! }
//!
//! impl Capability for dyn Router {
//!     const NAME: &'static str = "router";
//! }
//! ```
//!
//! Identity is the `TypeId` of the trait object; the name is what errors
//! report. A host implementation that leaves out an operation does not
//! compile, so contract completeness is checked by the type system.

use std::any::TypeId;
use std::fmt;

/// A named capability interface shared by every platform.
pub trait Capability: Send + Sync + 'static {
    /// Stable, human-readable interface name.
    const NAME: &'static str;
}

/// Runtime identity of a capability interface.
#[derive(Clone, Copy)]
pub struct CapabilityKey {
    name: &'static str,
    type_id: TypeId,
    type_name: &'static str,
}

impl CapabilityKey {
    pub fn of<C: ?Sized + Capability>() -> Self {
        CapabilityKey {
            name: C::NAME,
            type_id: TypeId::of::<C>(),
            type_name: std::any::type_name::<C>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Rust type of the interface, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub(crate) fn type_id(&self) -> TypeId {
        self.type_id
    }
}

impl PartialEq for CapabilityKey {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for CapabilityKey {}

impl fmt::Debug for CapabilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.type_name)
    }
}

impl fmt::Display for CapabilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
