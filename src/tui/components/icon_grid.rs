//! # IconGrid Component
//!
//! Draws the frame of every app cell: border, name label and flash state.
//! The icons themselves are sixel graphics painted over the blank cell
//! interiors after the frame is drawn, see `tui::paint_icons`.
//!
//! With borders on, a flash recolors the border. Without borders there is
//! nothing to recolor, so the cell background is tinted instead.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType};
use unicode_width::UnicodeWidthChar;

use crate::core::geometry::CellRect;
use crate::tui::component::Component;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Normal,
    Selected,
    Error,
}

impl CellState {
    fn color(self) -> Option<Color> {
        match self {
            CellState::Normal => None,
            CellState::Selected => Some(Color::LightCyan),
            CellState::Error => Some(Color::LightRed),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GridCell {
    pub rect: CellRect,
    pub name: String,
    pub state: CellState,
}

pub struct IconGrid {
    pub cells: Vec<GridCell>,
    pub border: bool,
}

impl IconGrid {
    pub fn new(cells: Vec<GridCell>, border: bool) -> Self {
        Self { cells, border }
    }
}

impl Component for IconGrid {
    /// `area` is the whole frame: cell rects are absolute terminal positions.
    /// Anything outside `area` is clipped.
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        for cell in &self.cells {
            let rect = Rect::new(cell.rect.x, cell.rect.y, cell.rect.width, cell.rect.height)
                .intersection(area);
            if rect.is_empty() {
                continue;
            }

            let block = if self.border {
                let border_style = match cell.state.color() {
                    Some(color) => Style::default().fg(color),
                    None => Style::default().fg(Color::DarkGray),
                };
                let label = truncate_to_width(&cell.name, rect.width.saturating_sub(2) as usize);
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(border_style)
                    .title_bottom(Line::from(label).alignment(Alignment::Center))
            } else {
                match cell.state.color() {
                    Some(color) => Block::new().style(Style::default().bg(color)),
                    None => Block::new(),
                }
            };
            frame.render_widget(block, rect);
        }
    }
}

/// Cuts `text` to at most `max` terminal columns, marking the cut with `…`.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
