//! # TUI Components
//!
//! Components receive external data as "props" (struct fields), not by
//! reading the `Session`. `ui::draw_ui` is the only place that turns session
//! state into props.
//!
//! ```text
//! components/
//! ├── mod.rs         (this file)
//! ├── clock_bar.rs   (time and date above the grid)
//! └── icon_grid.rs   (cell borders, labels, flash colors)
//! ```

pub mod clock_bar;
pub mod icon_grid;

pub use clock_bar::ClockBar;
pub use icon_grid::{CellState, GridCell, IconGrid};
