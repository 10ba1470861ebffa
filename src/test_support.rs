//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::config::{AppEntry, Behavior, GridSpec, ResolvedConfig, StyleSpec};
use crate::core::geometry::CellDim;
use crate::core::state::Session;
use crate::sys::{AppLauncher, LaunchError};

/// `count` apps on a 1x5 grid with no border or padding.
pub fn test_config(count: usize) -> ResolvedConfig {
    ResolvedConfig {
        grid: GridSpec {
            rows: 1,
            columns: 5,
        },
        style: StyleSpec {
            border: false,
            padding: 0,
        },
        behavior: Behavior::default(),
        apps: (0..count)
            .map(|i| AppEntry {
                name: format!("App {i}"),
                icon: None,
                package: format!("com.example.app{i}"),
                activity: None,
                icon_scale: None,
            })
            .collect(),
    }
}

/// A ready session on a 100x40 terminal with 10x20 pixel cells.
pub fn test_session(count: usize) -> Session {
    let mut session = Session::new(test_config(count));
    session.term_width = 100;
    session.term_height = 40;
    session.cell_px = CellDim {
        width: 10,
        height: 20,
    };
    session.ready = true;
    session
}

/// A launcher that records calls and fails when told to.
#[derive(Default)]
pub struct FakeLauncher {
    pub calls: Mutex<Vec<(String, Option<String>)>>,
    pub fail_with: Option<String>,
}

#[async_trait]
impl AppLauncher for FakeLauncher {
    async fn launch(&self, package: &str, activity: Option<&str>) -> Result<(), LaunchError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((package.to_string(), activity.map(str::to_string)));
        }
        match &self.fail_with {
            Some(message) => Err(LaunchError::Reported(message.clone())),
            None => Ok(()),
        }
    }
}
