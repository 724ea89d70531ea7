//! Capability contracts shared by every host shell.
//!
//! Each interface is declared once here so web and native shells compile
//! against the identical shape. The in-memory implementations are reference
//! adapters for headless hosts and tests.

pub mod data;
pub mod router;
pub mod theme;

pub use data::{DataSource, StaticData};
pub use router::{MemoryRouter, Router};
pub use theme::{ColorScheme, PaletteTheme, Theme};
