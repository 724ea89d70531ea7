//! High-level operations.
//!
//! This module contains the implementation of Duet commands.

pub mod check;
pub mod init;
pub mod plan;
pub mod resolve;

pub use check::{check_mapping, check_workspace, CheckReport};
pub use init::{init_package, InitOptions};
pub use plan::{plan_workspace, PlanOptions};
pub use resolve::{choose_target, load_mapping, load_workspace, resolve_module, Resolution};
