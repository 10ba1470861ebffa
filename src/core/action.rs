//! # Actions
//!
//! Everything that can happen in appsbar becomes an `Action`.
//! The terminal reports its size? That's `Action::Resized`.
//! A launch comes back? That's `Action::LaunchFinished`.
//!
//! The `update()` function takes the current session and an action, mutates
//! the session, and returns the `Effect`s the event loop should start. No
//! side effects here. I/O happens elsewhere, and every effect that finishes
//! comes back as another action.
//!
//! ```text
//! Session + Action  →  update()  →  Session' + [Effect]
//!                                            │
//!                      Action  ◄── task ◄────┘
//! ```

use std::time::Duration;

use log::{debug, info, warn};

use crate::core::config::ResizePolicy;
use crate::core::geometry::CellDim;
use crate::core::state::{Flash, FlashToken, Session};
use crate::graphics::IconImage;

/// How long a clicked cell stays highlighted.
pub const SELECTION_FLASH: Duration = Duration::from_millis(250);
/// How long a cell shows a failed launch.
pub const ERROR_FLASH: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Press,
    Release,
    Drag,
    Move,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Terminal size in character cells.
    Resized { columns: u16, rows: u16 },
    /// Result of the pixels-per-cell query.
    CellPixelsReported(CellDim),
    /// Every app's icon, in display order.
    IconsLoaded(Vec<IconImage>),
    Pointer { kind: PointerKind, x: u16, y: u16 },
    LaunchFinished {
        index: usize,
        result: Result<(), String>,
    },
    ClearSelection { index: usize, token: FlashToken },
    ClearError { index: usize, token: FlashToken },
    /// The event loop finished painting every icon.
    IconsPainted,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Measure pixels per cell, answer with `CellPixelsReported`.
    QueryGeometry,
    /// Load all icons in one batch, answer with `IconsLoaded`.
    LoadIcons,
    /// Start app `index`, answer with `LaunchFinished`.
    Launch { index: usize },
    /// Send `ClearSelection` after `after`.
    ScheduleClearSelection {
        index: usize,
        token: FlashToken,
        after: Duration,
    },
    /// Send `ClearError` after `after`.
    ScheduleClearError {
        index: usize,
        token: FlashToken,
        after: Duration,
    },
    ClearScreen,
    Quit,
}

/// Effects to start before the first event.
pub fn init(session: &Session) -> Vec<Effect> {
    if session.apps.is_empty() {
        return Vec::new();
    }
    vec![Effect::LoadIcons]
}

pub fn update(session: &mut Session, action: Action) -> Vec<Effect> {
    match action {
        Action::Resized { columns, rows } => on_resize(session, columns, rows),

        Action::CellPixelsReported(cell_px) => {
            info!("Cell size {}x{} px, ready", cell_px.width, cell_px.height);
            session.cell_px = cell_px;
            session.ready = true;
            session.cache.clear();
            session.needs_full_redraw = true;
            vec![Effect::ClearScreen]
        }

        Action::IconsLoaded(icons) => {
            debug!("{} icons loaded for {} apps", icons.len(), session.apps.len());
            let mut icons = icons.into_iter();
            for slot in session.icons.iter_mut() {
                *slot = icons.next();
            }
            session.cache.clear();
            session.needs_full_redraw = true;
            Vec::new()
        }

        Action::Pointer { kind, x, y } => {
            if kind != PointerKind::Release || !session.ready {
                return Vec::new();
            }
            let Some(index) = session.layout().hit_test(x, y) else {
                return Vec::new();
            };
            let token = session.next_token();
            session.selected = Some(Flash { index, token });
            repaint_if_tinted(session);
            info!("Clicked '{}' at ({}, {})", session.apps[index].name, x, y);
            vec![
                Effect::Launch { index },
                Effect::ScheduleClearSelection {
                    index,
                    token,
                    after: SELECTION_FLASH,
                },
            ]
        }

        Action::LaunchFinished { index, result } => match result {
            Ok(()) if session.behavior.close_on_launch => {
                info!("Launched app {}, closing", index);
                vec![Effect::Quit]
            }
            Ok(()) => Vec::new(),
            Err(message) => {
                warn!("Launch of app {} failed: {}", index, message);
                if index >= session.error_flash.len() {
                    return Vec::new();
                }
                let token = session.next_token();
                session.error_flash[index] = Some(token);
                repaint_if_tinted(session);
                vec![Effect::ScheduleClearError {
                    index,
                    token,
                    after: ERROR_FLASH,
                }]
            }
        },

        Action::ClearSelection { index, token } => {
            if session.selected == Some(Flash { index, token }) {
                session.selected = None;
                repaint_if_tinted(session);
            }
            Vec::new()
        }

        Action::ClearError { index, token } => {
            if let Some(slot) = session.error_flash.get_mut(index) {
                if *slot == Some(token) {
                    *slot = None;
                    repaint_if_tinted(session);
                }
            }
            Vec::new()
        }

        Action::IconsPainted => {
            session.needs_full_redraw = false;
            Vec::new()
        }

        Action::Quit => vec![Effect::Quit],
    }
}

/// Without borders a flash tints the whole cell, painting over its icon.
fn repaint_if_tinted(session: &mut Session) {
    if !session.style.border {
        session.needs_full_redraw = true;
    }
}

fn on_resize(session: &mut Session, columns: u16, rows: u16) -> Vec<Effect> {
    if session.term_width == 0 && session.term_height == 0 {
        info!("Terminal is {}x{} cells", columns, rows);
        session.term_width = columns;
        session.term_height = rows;
        return vec![Effect::QueryGeometry];
    }

    if (columns, rows) == (session.term_width, session.term_height) {
        return Vec::new();
    }

    match session.behavior.resize_policy {
        ResizePolicy::Ignore => {
            debug!("Ignoring resize to {}x{}", columns, rows);
            Vec::new()
        }
        policy => {
            info!("Terminal resized to {}x{} ({:?})", columns, rows, policy);
            session.term_width = columns;
            session.term_height = rows;
            session.cache.clear();
            session.needs_full_redraw = true;
            if policy == ResizePolicy::Requery {
                vec![Effect::QueryGeometry, Effect::ClearScreen]
            } else {
                vec![Effect::ClearScreen]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cache::{CacheKey, RenderedIcon};
    use crate::graphics::placeholder;
    use crate::test_support::{test_config, test_session};

    fn fill_cache(session: &mut Session) {
        session.cache.put(
            CacheKey::new(0, 20, 10),
            RenderedIcon {
                payload: "x".to_string(),
                width_px: 1,
                height_px: 1,
            },
        );
    }

    fn release(x: u16, y: u16) -> Action {
        Action::Pointer {
            kind: PointerKind::Release,
            x,
            y,
        }
    }

    #[test]
    fn test_init_loads_icons() {
        let session = Session::new(test_config(3));
        assert_eq!(init(&session), vec![Effect::LoadIcons]);
        let empty = Session::new(test_config(0));
        assert!(init(&empty).is_empty());
    }

    #[test]
    fn test_first_resize_requests_geometry() {
        let mut session = Session::new(test_config(5));
        let effects = update(&mut session, Action::Resized { columns: 100, rows: 40 });
        assert_eq!(effects, vec![Effect::QueryGeometry]);
        assert_eq!((session.term_width, session.term_height), (100, 40));
        assert!(!session.ready);
    }

    #[test]
    fn test_cell_pixels_make_session_ready() {
        let mut session = Session::new(test_config(5));
        update(&mut session, Action::Resized { columns: 100, rows: 40 });
        fill_cache(&mut session);
        session.needs_full_redraw = false;

        let cell = CellDim {
            width: 12,
            height: 24,
        };
        let effects = update(&mut session, Action::CellPixelsReported(cell));

        assert_eq!(effects, vec![Effect::ClearScreen]);
        assert!(session.ready);
        assert_eq!(session.cell_px, cell);
        assert!(session.cache.is_empty());
        assert!(session.needs_full_redraw);
    }

    #[test]
    fn test_later_resize_ignored_by_default() {
        let mut session = test_session(5);
        fill_cache(&mut session);
        let effects = update(&mut session, Action::Resized { columns: 80, rows: 20 });
        assert!(effects.is_empty());
        assert_eq!((session.term_width, session.term_height), (100, 40));
        assert_eq!(session.cache.len(), 1);
    }

    #[test]
    fn test_reflow_policy_reprocesses_resize() {
        let mut session = test_session(5);
        session.behavior.resize_policy = ResizePolicy::Reflow;
        session.needs_full_redraw = false;
        fill_cache(&mut session);

        let effects = update(&mut session, Action::Resized { columns: 80, rows: 20 });

        assert_eq!(effects, vec![Effect::ClearScreen]);
        assert_eq!((session.term_width, session.term_height), (80, 20));
        assert!(session.cache.is_empty());
        assert!(session.needs_full_redraw);
        assert!(session.ready);
    }

    #[test]
    fn test_requery_policy_measures_again() {
        let mut session = test_session(5);
        session.behavior.resize_policy = ResizePolicy::Requery;
        fill_cache(&mut session);

        let effects = update(&mut session, Action::Resized { columns: 80, rows: 20 });

        assert_eq!(effects, vec![Effect::QueryGeometry, Effect::ClearScreen]);
        assert!(session.cache.is_empty());
    }

    #[test]
    fn test_same_size_resize_is_noop() {
        let mut session = test_session(5);
        session.behavior.resize_policy = ResizePolicy::Requery;
        fill_cache(&mut session);
        let effects = update(&mut session, Action::Resized { columns: 100, rows: 40 });
        assert!(effects.is_empty());
        assert_eq!(session.cache.len(), 1);
    }

    #[test]
    fn test_icons_loaded_fills_slots() {
        let mut session = test_session(3);
        fill_cache(&mut session);
        session.needs_full_redraw = false;

        let icons = vec![placeholder(8, 8), placeholder(16, 16), placeholder(32, 32)];
        let effects = update(&mut session, Action::IconsLoaded(icons));

        assert!(effects.is_empty());
        assert!(session.icons.iter().all(Option::is_some));
        assert_eq!(session.icons[2].as_ref().map(|i| i.width), Some(32));
        assert!(session.cache.is_empty());
        assert!(session.needs_full_redraw);
    }

    #[test]
    fn test_short_icon_batch_leaves_rest_empty() {
        let mut session = test_session(3);
        update(&mut session, Action::IconsLoaded(vec![placeholder(8, 8)]));
        assert!(session.icons[0].is_some());
        assert!(session.icons[1].is_none());
        assert_eq!(session.icons.len(), 3);
    }

    #[test]
    fn test_click_selects_and_launches() {
        let mut session = test_session(5);
        let effects = update(&mut session, release(45, 35));

        let token = session.selected.map(|f| f.token).unwrap();
        assert_eq!(session.selected_index(), Some(2));
        assert_eq!(
            effects,
            vec![
                Effect::Launch { index: 2 },
                Effect::ScheduleClearSelection {
                    index: 2,
                    token,
                    after: SELECTION_FLASH
                },
            ]
        );
    }

    #[test]
    fn test_click_before_ready_is_ignored() {
        let mut session = Session::new(test_config(5));
        update(&mut session, Action::Resized { columns: 100, rows: 40 });
        assert!(update(&mut session, release(45, 35)).is_empty());
        assert_eq!(session.selected, None);
    }

    #[test]
    fn test_non_release_pointer_is_ignored() {
        let mut session = test_session(5);
        for kind in [PointerKind::Press, PointerKind::Drag, PointerKind::Move] {
            let effects = update(&mut session, Action::Pointer { kind, x: 45, y: 35 });
            assert!(effects.is_empty());
        }
        assert_eq!(session.selected, None);
    }

    #[test]
    fn test_click_outside_grid_is_ignored() {
        let mut session = test_session(5);
        assert!(update(&mut session, release(45, 5)).is_empty());
        assert_eq!(session.selected, None);
    }

    #[test]
    fn test_clear_selection_guarded_by_token() {
        let mut session = test_session(5);
        update(&mut session, release(5, 35));
        let first = session.selected.unwrap();
        update(&mut session, release(5, 35));
        let second = session.selected.unwrap();
        assert_eq!(first.index, second.index);

        // The first click's timer must not cut the second flash short.
        update(
            &mut session,
            Action::ClearSelection {
                index: first.index,
                token: first.token,
            },
        );
        assert_eq!(session.selected, Some(second));

        update(
            &mut session,
            Action::ClearSelection {
                index: second.index,
                token: second.token,
            },
        );
        assert_eq!(session.selected, None);
    }

    #[test]
    fn test_clear_selection_for_other_cell_is_noop() {
        let mut session = test_session(5);
        update(&mut session, release(5, 35));
        let first = session.selected.unwrap();
        update(&mut session, release(85, 35));
        update(
            &mut session,
            Action::ClearSelection {
                index: first.index,
                token: first.token,
            },
        );
        assert_eq!(session.selected_index(), Some(4));
    }

    #[test]
    fn test_launch_success_keeps_running() {
        let mut session = test_session(5);
        let effects = update(&mut session, Action::LaunchFinished { index: 1, result: Ok(()) });
        assert!(effects.is_empty());
    }

    #[test]
    fn test_launch_success_closes_when_configured() {
        let mut session = test_session(5);
        session.behavior.close_on_launch = true;
        let effects = update(&mut session, Action::LaunchFinished { index: 1, result: Ok(()) });
        assert_eq!(effects, vec![Effect::Quit]);
    }

    #[test]
    fn test_launch_failure_flashes_error() {
        let mut session = test_session(5);
        session.behavior.close_on_launch = true;
        let effects = update(
            &mut session,
            Action::LaunchFinished {
                index: 3,
                result: Err("Error: Activity not started".to_string()),
            },
        );

        assert!(session.has_error(3));
        let token = session.error_flash[3].unwrap();
        assert_eq!(
            effects,
            vec![Effect::ScheduleClearError {
                index: 3,
                token,
                after: ERROR_FLASH
            }]
        );

        update(&mut session, Action::ClearError { index: 3, token });
        assert!(!session.has_error(3));
    }

    #[test]
    fn test_stale_clear_error_is_noop() {
        let mut session = test_session(5);
        let failure = || Action::LaunchFinished {
            index: 0,
            result: Err("boom".to_string()),
        };
        update(&mut session, failure());
        let stale = session.error_flash[0].unwrap();
        update(&mut session, failure());
        let fresh = session.error_flash[0].unwrap();

        update(&mut session, Action::ClearError { index: 0, token: stale });
        assert!(session.has_error(0));

        update(&mut session, Action::ClearError { index: 0, token: fresh });
        assert!(!session.has_error(0));

        // Already clear: still a no-op.
        update(&mut session, Action::ClearError { index: 0, token: fresh });
        assert!(!session.has_error(0));
    }

    #[test]
    fn test_out_of_range_indices_are_ignored() {
        let mut session = test_session(2);
        let effects = update(
            &mut session,
            Action::LaunchFinished {
                index: 9,
                result: Err("boom".to_string()),
            },
        );
        assert!(effects.is_empty());
        assert!(update(&mut session, Action::ClearError { index: 9, token: 1 }).is_empty());
    }

    #[test]
    fn test_icons_painted_clears_redraw_flag() {
        let mut session = test_session(1);
        assert!(session.needs_full_redraw);
        assert!(update(&mut session, Action::IconsPainted).is_empty());
        assert!(!session.needs_full_redraw);
    }

    #[test]
    fn test_borderless_flash_repaints_icons() {
        let mut session = test_session(5);
        session.needs_full_redraw = false;
        update(&mut session, release(45, 35));
        assert!(session.needs_full_redraw);

        session.needs_full_redraw = false;
        let token = session.selected.map(|f| f.token).unwrap();
        update(&mut session, Action::ClearSelection { index: 2, token });
        assert!(session.needs_full_redraw);
    }

    #[test]
    fn test_bordered_flash_leaves_icons_alone() {
        let mut session = test_session(5);
        session.style.border = true;
        session.needs_full_redraw = false;
        update(&mut session, release(45, 35));
        assert!(!session.needs_full_redraw);
    }

    #[test]
    fn test_quit() {
        let mut session = test_session(1);
        assert_eq!(update(&mut session, Action::Quit), vec![Effect::Quit]);
    }
}
