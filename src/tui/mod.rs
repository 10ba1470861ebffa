//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, draws the launcher,
//! translates crossterm events into `core::Action` values and runs the
//! `Effect`s that `update()` hands back.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! Each frame has two layers:
//!
//! - **Text** (clock, borders, labels): drawn through ratatui, which only
//!   writes the cells that changed. Flash on/off is a border recolor, or a
//!   background tint when borders are off.
//! - **Icons** (sixel): written straight to stdout on top of the blank cell
//!   interiors, and only while `Session::needs_full_redraw` is set. Once
//!   painted, the loop applies `Action::IconsPainted` and later frames leave
//!   them alone until a tint or a geometry change makes the reducer ask again.
//!
//! The loop wakes at least every 100ms so the deferred-clear timers and the
//! clock are picked up promptly.

mod component;
pub mod components;
mod event;
pub mod tasks;
mod ui;

use log::{debug, info};
use std::io::{Write, stdout};
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::style::Print;
use crossterm::{execute, queue};

use crate::core::action::{Action, Effect, init, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::Session;
use crate::graphics::{IconRenderer, SixelRenderer};
use crate::sys::{AmLauncher, AppLauncher};
use crate::tui::event::{poll_event_immediate, poll_event_timeout};
use crate::tui::tasks::TaskSpawner;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, Hide)?;
        info!("Terminal modes enabled (mouse capture, hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, Show);
    }
}

/// Whether the loop keeps going after an effect.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    run_with(config, Arc::new(AmLauncher::new()), &SixelRenderer)
}

pub fn run_with(
    config: ResolvedConfig,
    launcher: Arc<dyn AppLauncher>,
    renderer: &dyn IconRenderer,
) -> std::io::Result<()> {
    let mut session = Session::new(config);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let spawner = TaskSpawner::new(tx.clone(), launcher, &session.apps);

    for effect in init(&session) {
        spawner.spawn(effect);
    }
    let size = terminal.size()?;
    if tx
        .send(Action::Resized {
            columns: size.width,
            rows: size.height,
        })
        .is_err()
    {
        debug!("Action channel closed before startup");
    }

    let mut needs_redraw = true; // Force first frame
    let mut last_minute = clock_minute();

    'event_loop: loop {
        let minute = clock_minute();
        if minute != last_minute {
            last_minute = minute;
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &session))?;
            needs_redraw = false;

            if session.ready && session.needs_full_redraw && session.icons_loaded() {
                paint_icons(&mut session, renderer)?;
                // Applied right away: a queued repaint request must not be
                // overtaken by this acknowledgement. It never yields effects.
                let effects = update(&mut session, Action::IconsPainted);
                debug_assert!(effects.is_empty());
            }
        }

        // Terminal input first, then everything the background tasks produced.
        let first_event = poll_event_timeout(POLL_INTERVAL);
        let input = first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
            .map(|event| event.into_action());
        let background = std::iter::from_fn(|| rx.try_recv().ok());

        for action in input.chain(background) {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            for effect in update(&mut session, action) {
                if apply_effect(effect, &mut terminal, &spawner)? == Flow::Quit {
                    break 'event_loop;
                }
            }
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}

fn apply_effect(
    effect: Effect,
    terminal: &mut ratatui::DefaultTerminal,
    spawner: &TaskSpawner,
) -> std::io::Result<Flow> {
    match effect {
        Effect::Quit => return Ok(Flow::Quit),
        Effect::ClearScreen => terminal.clear()?,
        other => spawner.spawn(other),
    }
    Ok(Flow::Continue)
}

/// Writes every loaded icon's sixel payload into its cell.
fn paint_icons(session: &mut Session, renderer: &dyn IconRenderer) -> std::io::Result<()> {
    let layout = session.layout();
    let mut out = stdout().lock();
    let mut painted = 0;

    for index in 0..session.apps.len() {
        let Some(rect) = layout.cell_rect(index) else {
            continue;
        };
        let Some(icon) = session.rendered_icon(index, renderer).cloned() else {
            continue;
        };
        let (x, y) = ui::icon_origin(session, &layout, rect, &icon);
        queue!(out, MoveTo(x, y), Print(&icon.payload))?;
        painted += 1;
    }

    out.flush()?;
    debug!(
        "Painted {} icons ({} cached renders)",
        painted,
        session.cache.len()
    );
    Ok(())
}

fn clock_minute() -> String {
    chrono::Local::now().format("%H:%M").to_string()
}
