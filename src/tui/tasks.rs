//! # Background Tasks
//!
//! Runs the `Effect`s that need I/O or time. Each task sends exactly one
//! `Action` back over the event loop's channel when it finishes and touches
//! nothing else. There is no cancellation: a task whose answer is stale by
//! the time it arrives is ignored by `update()`.
//!
//! Effects that act on the terminal itself (`ClearScreen`, `Quit`) belong to
//! the event loop and are ignored here.

use std::sync::{Arc, mpsc};
use std::time::Duration;

use log::{debug, info, warn};

use crate::core::action::{Action, Effect};
use crate::core::config::AppEntry;
use crate::graphics::load_icons;
use crate::sys::{AppLauncher, query_cell_dim};

pub struct TaskSpawner {
    tx: mpsc::Sender<Action>,
    launcher: Arc<dyn AppLauncher>,
    apps: Arc<[AppEntry]>,
}

impl TaskSpawner {
    pub fn new(tx: mpsc::Sender<Action>, launcher: Arc<dyn AppLauncher>, apps: &[AppEntry]) -> Self {
        Self {
            tx,
            launcher,
            apps: apps.into(),
        }
    }

    /// Starts the task for `effect`. Must be called inside a tokio runtime.
    pub fn spawn(&self, effect: Effect) {
        match effect {
            Effect::QueryGeometry => spawn_geometry_query(self.tx.clone()),
            Effect::LoadIcons => spawn_icon_load(self.apps.clone(), self.tx.clone()),
            Effect::Launch { index } => self.spawn_launch(index),
            Effect::ScheduleClearSelection {
                index,
                token,
                after,
            } => spawn_after(after, Action::ClearSelection { index, token }, self.tx.clone()),
            Effect::ScheduleClearError {
                index,
                token,
                after,
            } => spawn_after(after, Action::ClearError { index, token }, self.tx.clone()),
            Effect::ClearScreen | Effect::Quit => {}
        }
    }

    fn spawn_launch(&self, index: usize) {
        let Some(app) = self.apps.get(index).cloned() else {
            warn!("No app at index {}", index);
            send(
                &self.tx,
                Action::LaunchFinished {
                    index,
                    result: Err(format!("no app at index {index}")),
                },
            );
            return;
        };
        let launcher = self.launcher.clone();
        let tx = self.tx.clone();
        info!("Spawning launch of '{}' ({})", app.name, app.package);
        tokio::spawn(async move {
            let result = launcher
                .launch(&app.package, app.activity.as_deref())
                .await
                .map_err(|e| e.to_string());
            send(&tx, Action::LaunchFinished { index, result });
        });
    }
}

fn spawn_geometry_query(tx: mpsc::Sender<Action>) {
    debug!("Spawning terminal geometry query");
    tokio::task::spawn_blocking(move || {
        let cell = query_cell_dim();
        send(&tx, Action::CellPixelsReported(cell));
    });
}

fn spawn_icon_load(apps: Arc<[AppEntry]>, tx: mpsc::Sender<Action>) {
    info!("Spawning icon load for {} apps", apps.len());
    tokio::task::spawn_blocking(move || {
        let icons = load_icons(&apps);
        send(&tx, Action::IconsLoaded(icons));
    });
}

fn spawn_after(after: Duration, action: Action, tx: mpsc::Sender<Action>) {
    tokio::spawn(async move {
        tokio::time::sleep(after).await;
        send(&tx, action);
    });
}

fn send(tx: &mpsc::Sender<Action>, action: Action) {
    if tx.send(action).is_err() {
        warn!("Failed to send task result: receiver dropped");
    }
}
