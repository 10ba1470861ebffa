use chrono::Local;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::core::cache::RenderedIcon;
use crate::core::geometry::{CellDim, CellRect, GridLayout};
use crate::core::state::Session;
use crate::tui::component::Component;
use crate::tui::components::{CellState, ClockBar, GridCell, IconGrid};

pub fn draw_ui(frame: &mut Frame, session: &Session) {
    let area = frame.area();
    let layout = session.layout();

    // Before the first size report the layout is empty: clock only.
    let top = if session.term_height == 0 {
        area.height
    } else {
        layout.top_row_height().min(area.height)
    };
    let mut clock = ClockBar::at(&Local::now());
    clock.render(frame, Rect::new(area.x, area.y, area.width, top));

    if !session.ready {
        return;
    }
    let mut grid = IconGrid::new(grid_cells(session, &layout), session.style.border);
    grid.render(frame, area);
}

/// Props for every app that has a cell on screen.
pub fn grid_cells(session: &Session, layout: &GridLayout) -> Vec<GridCell> {
    session
        .apps
        .iter()
        .enumerate()
        .filter_map(|(index, app)| {
            let rect = layout.cell_rect(index)?;
            let state = if session.has_error(index) {
                CellState::Error
            } else if session.selected_index() == Some(index) {
                CellState::Selected
            } else {
                CellState::Normal
            };
            Some(GridCell {
                rect,
                name: app.name.clone(),
                state,
            })
        })
        .collect()
}

/// Terminal cell where a rendered icon's top-left corner goes: inside the
/// border and padding, centered in the space left over. Always inside `rect`,
/// however large the padding.
pub fn icon_origin(
    session: &Session,
    layout: &GridLayout,
    rect: CellRect,
    icon: &RenderedIcon,
) -> (u16, u16) {
    let inset = session
        .style
        .padding
        .saturating_add(u16::from(session.style.border));
    let cells = layout.icon_cell_size();
    let CellDim { width, height } = session.cell_px;

    let center = |cells: u16, cell_px: u32, icon_px: u32| -> u16 {
        let free_px = (u32::from(cells) * cell_px).saturating_sub(icon_px);
        (free_px / 2 / cell_px.max(1)).min(u32::from(u16::MAX)) as u16
    };
    let place = |start: u16, span: u16, offset: u16| -> u16 {
        let last = start.saturating_add(span.saturating_sub(1));
        start
            .saturating_add(inset.min(span.saturating_sub(1)))
            .saturating_add(offset)
            .min(last)
    };
    (
        place(rect.x, rect.width, center(cells.width, width, icon.width_px)),
        place(rect.y, rect.height, center(cells.height, height, icon.height_px)),
    )
}
