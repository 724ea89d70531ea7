//! Where artifacts come from.
//!
//! Only local package trees are supported; the listing they produce is the
//! sole input the resolver reads.

pub mod tree;

pub use tree::{PackageTree, SourceFile};
