//! # Core Launcher Logic
//!
//! This module contains appsbar's state machine and layout math.
//! It knows nothing about terminals, tasks or files.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Session (state)      │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • geometry, cache      │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │    sys     │      │  graphics  │
//!     │ (ratatui)  │      │ (am, tty)  │      │ (png,sixel)│
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `Session` struct, all runtime state in one place
//! - [`action`]: The `Action` and `Effect` enums and the `update()` reducer
//! - [`geometry`]: Grid layout and hit testing
//! - [`cache`]: Rendered-icon cache
//! - [`config`]: TOML config loading and resolution

pub mod action;
pub mod cache;
pub mod config;
pub mod geometry;
pub mod state;
