//! Platform-variant resolution.
//!
//! Maps a logical module identifier and the active platform target to one
//! concrete artifact. The resolver is pure and deterministic - scanning
//! happens before a [`VariantMapping`] is built, and the mapping never
//! changes afterwards.

pub mod errors;
pub mod mapping;
pub mod plan;

pub use errors::{PlanError, ResolutionError};
pub use mapping::{Conflict, VariantMapping};
pub use plan::{BuildPlan, PlanEntry};
