//! Terminal size queries.

use std::io;

use log::{debug, warn};

use crate::core::geometry::CellDim;

/// Terminal size in character cells and pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalGeometry {
    pub columns: u16,
    pub rows: u16,
    pub pixel_width: u16,
    pub pixel_height: u16,
    pub cell: CellDim,
}

impl TerminalGeometry {
    /// Derives the per-cell pixel size. An axis the terminal did not report
    /// (zero pixels or zero cells) falls back to [`CellDim::FALLBACK`].
    pub fn from_window(columns: u16, rows: u16, pixel_width: u16, pixel_height: u16) -> Self {
        let per_cell = |pixels: u16, cells: u16, fallback: u32| {
            if pixels > 0 && cells > 0 {
                Some(pixels as u32 / cells as u32).filter(|v| *v > 0).unwrap_or(fallback)
            } else {
                fallback
            }
        };
        Self {
            columns,
            rows,
            pixel_width,
            pixel_height,
            cell: CellDim {
                width: per_cell(pixel_width, columns, CellDim::FALLBACK.width),
                height: per_cell(pixel_height, rows, CellDim::FALLBACK.height),
            },
        }
    }
}

/// Asks the terminal for its size (`TIOCGWINSZ` on unix).
pub fn query_geometry() -> io::Result<TerminalGeometry> {
    let size = crossterm::terminal::window_size()?;
    let geometry = TerminalGeometry::from_window(size.columns, size.rows, size.width, size.height);
    debug!("Terminal geometry: {:?}", geometry);
    Ok(geometry)
}

/// Pixels per character cell, never failing.
pub fn query_cell_dim() -> CellDim {
    match query_geometry() {
        Ok(geometry) => geometry.cell,
        Err(e) => {
            warn!("Terminal geometry unavailable ({}), using fallback cell size", e);
            CellDim::FALLBACK
        }
    }
}
