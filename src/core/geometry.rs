//! # Grid Geometry
//!
//! Pure layout math for the icon grid. Everything here is a function of the
//! terminal size (in character cells), the grid shape and the cell style.
//!
//! ```text
//!  ┌──────────────────────────────────────────┐  ┐
//!  │               top row (clock)            │  │ top_row_height()
//!  ├────────┬────────┬────────┬───────┬───────┤  ┘
//!  │ cell 0 │ cell 1 │ cell 2 │ cell 3│ cell 4│  ┐ icon grid
//!  └────────┴────────┴────────┴───────┴───────┘  ┘
//!   ◄─ w+1 ─►◄─ w+1 ─►◄─ w+1 ─►◄─ w ──►◄─ w ──►
//! ```
//!
//! Column widths are `terminal_width / columns`, with the remainder handed
//! out one cell at a time to the leftmost columns, so the columns always
//! add up to the full terminal width. Cell height is half the width because
//! a terminal character is about twice as tall as it is wide.
//!
//! A grid with zero rows or columns is degenerate: every size is zero and
//! every hit test misses.

use crate::core::config::{AppEntry, GridSpec, StyleSpec};

/// Smallest and largest per-app icon scale.
pub const MIN_ICON_SCALE: f64 = 0.1;
pub const MAX_ICON_SCALE: f64 = 1.0;

/// A size in terminal character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    pub width: u16,
    pub height: u16,
}

impl Dimensions {
    pub const ZERO: Dimensions = Dimensions {
        width: 0,
        height: 0,
    };

    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A rectangle in terminal character cells, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl CellRect {
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && y >= self.y
            && (x as u32) < self.x as u32 + self.width as u32
            && (y as u32) < self.y as u32 + self.height as u32
    }
}

/// Pixel size of one terminal character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellDim {
    pub width: u32,
    pub height: u32,
}

impl CellDim {
    /// Used when the terminal does not report its pixel size.
    pub const FALLBACK: CellDim = CellDim {
        width: 10,
        height: 20,
    };
}

impl Default for CellDim {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// A target size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBox {
    pub width: u32,
    pub height: u32,
}

/// Grid layout for one terminal size.
///
/// Cheap to build; the session makes a fresh one whenever it needs an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    term_width: u16,
    term_height: u16,
    rows: u16,
    columns: u16,
    border: bool,
    padding: u16,
    app_count: usize,
}

impl GridLayout {
    pub fn new(
        term_width: u16,
        term_height: u16,
        grid: GridSpec,
        style: StyleSpec,
        app_count: usize,
    ) -> Self {
        Self {
            term_width,
            term_height,
            rows: clamp_dimension(grid.rows),
            columns: clamp_dimension(grid.columns),
            border: style.border,
            padding: style.padding,
            app_count,
        }
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    fn is_degenerate(&self) -> bool {
        self.rows == 0 || self.columns == 0
    }

    /// Base size of one grid cell. Columns to the left may be one wider,
    /// see [`GridLayout::cell_width_for_column`].
    pub fn grid_cell_size(&self) -> Dimensions {
        if self.is_degenerate() {
            return Dimensions::ZERO;
        }
        let width = self.term_width / self.columns;
        let height = (width / 2).max(1);
        Dimensions { width, height }
    }

    /// Size of the whole icon grid. Always leaves at least one terminal row free.
    pub fn icon_grid_dimensions(&self) -> Dimensions {
        if self.is_degenerate() {
            return Dimensions::ZERO;
        }
        let cell = self.grid_cell_size();
        let wanted = cell.height as u32 * self.rows as u32;
        let limit = self.term_height.saturating_sub(1) as u32;
        Dimensions {
            width: self.term_width,
            height: wanted.min(limit) as u16,
        }
    }

    /// Rows above the icon grid. Zero when the grid already takes everything
    /// but the last row.
    pub fn top_row_height(&self) -> u16 {
        let grid_height = self.icon_grid_dimensions().height;
        if grid_height >= self.term_height.saturating_sub(1) {
            return 0;
        }
        self.term_height - grid_height
    }

    /// Area left for the icon once padding and border are taken off a cell.
    pub fn icon_cell_size(&self) -> Dimensions {
        let cell = self.grid_cell_size();
        let border = if self.border { 2 } else { 0 };
        let inset = self.padding.saturating_mul(2).saturating_add(border);
        Dimensions {
            width: cell.width.saturating_sub(inset).max(1),
            height: cell.height.saturating_sub(inset).max(1),
        }
    }

    /// Terminal columns not covered by `columns` base-width cells.
    fn remainder(&self) -> u16 {
        let base = self.grid_cell_size().width as u32;
        (self.term_width as u32 - base * self.columns as u32) as u16
    }

    pub fn cell_width_for_column(&self, col: u16) -> u16 {
        if self.is_degenerate() || col >= self.columns {
            return 0;
        }
        let base = self.grid_cell_size().width;
        if col < self.remainder() {
            base + 1
        } else {
            base
        }
    }

    /// Left edge of `col`: the sum of the widths of every column before it.
    pub fn cell_x_position(&self, col: u16) -> u16 {
        if self.is_degenerate() {
            return 0;
        }
        let col = col.min(self.columns) as u32;
        let base = self.grid_cell_size().width as u32;
        let wide = col.min(self.remainder() as u32);
        (wide * (base + 1) + (col - wide) * base) as u16
    }

    /// Column under terminal column `x`, using the same widths as drawing.
    fn column_at(&self, x: u16) -> Option<u16> {
        if x >= self.term_width {
            return None;
        }
        let base = self.grid_cell_size().width as u32;
        let remainder = self.remainder() as u32;
        let wide_span = remainder * (base + 1);
        let x = x as u32;
        let col = if x < wide_span {
            x / (base + 1)
        } else if base == 0 {
            return None;
        } else {
            remainder + (x - wide_span) / base
        };
        u16::try_from(col).ok().filter(|c| *c < self.columns)
    }

    /// Cell occupied by app `index`, or `None` if that app has no cell on screen.
    pub fn cell_rect(&self, index: usize) -> Option<CellRect> {
        let cell = self.grid_cell_size();
        if cell.is_empty() || index >= self.app_count {
            return None;
        }
        let columns = self.columns as usize;
        let (row, col) = (index / columns, (index % columns) as u16);
        if row >= self.rows as usize {
            return None;
        }

        let grid_top = self.top_row_height() as u32;
        let grid_bottom = grid_top + self.icon_grid_dimensions().height as u32;
        let y = grid_top + row as u32 * cell.height as u32;
        if y >= grid_bottom {
            return None;
        }
        Some(CellRect {
            x: self.cell_x_position(col),
            y: y as u16,
            width: self.cell_width_for_column(col),
            height: (cell.height as u32).min(grid_bottom - y) as u16,
        })
    }

    /// App index under the terminal position `(x, y)`, row-major from the
    /// top-left cell.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<usize> {
        let cell = self.grid_cell_size();
        if cell.is_empty() {
            return None;
        }

        let top = self.top_row_height();
        if y < top {
            return None;
        }
        let adjusted_y = y - top;
        if adjusted_y >= self.icon_grid_dimensions().height {
            return None;
        }

        let col = self.column_at(x)?;
        let row = adjusted_y / cell.height;
        if row >= self.rows {
            return None;
        }

        let index = row as usize * self.columns as usize + col as usize;
        (index < self.app_count).then_some(index)
    }

    /// Pixel box available to an icon, shrunk by the app's scale.
    pub fn icon_pixel_box(&self, cell_px: CellDim, scale: f64) -> PixelBox {
        let icon = self.icon_cell_size();
        let scale = scale.clamp(MIN_ICON_SCALE, MAX_ICON_SCALE);
        let width = (icon.width as f64 * cell_px.width as f64 * scale) as u32;
        let height = (icon.height as f64 * cell_px.height as f64 * scale) as u32;
        PixelBox {
            width: width.max(1),
            height: height.max(1),
        }
    }
}

fn clamp_dimension(value: i32) -> u16 {
    value.clamp(0, u16::MAX as i32) as u16
}

/// Icon scale for the app at `index`. Unknown apps and unset or nonsensical
/// values scale to 1.0.
pub fn icon_scale(apps: &[AppEntry], index: usize) -> f64 {
    apps.get(index)
        .and_then(|app| app.icon_scale)
        .filter(|s| s.is_finite() && *s > 0.0)
        .map(|s| s.clamp(MIN_ICON_SCALE, MAX_ICON_SCALE))
        .unwrap_or(1.0)
}
