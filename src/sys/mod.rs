//! # System Integration
//!
//! The two places appsbar touches the device: asking the terminal how big it
//! is, and asking Android to start an app.

pub mod launcher;
pub mod terminal;

pub use launcher::{AmLauncher, AppLauncher, LaunchError};
pub use terminal::{TerminalGeometry, query_cell_dim, query_geometry};
