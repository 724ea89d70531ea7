//! Shared screens and the smart/dumb boundary.
//!
//! A [`Screen`] takes fully-resolved props and renders; a host-specific
//! [`DataAdapter`] produces those props. [`HostShell::mount`](crate::registry::HostShell)
//! joins the two inside a capability scope.

pub mod adapter;
pub mod mount;
pub mod node;

pub use adapter::{DataAdapter, SourceProps, StaticProps};
pub use mount::{Screen, ScreenError};
pub use node::{Element, Node};
