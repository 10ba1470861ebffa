use std::fmt;
use std::process::Stdio;

use async_trait::async_trait;
use log::{debug, info};
use tokio::process::Command;

/// Errors that can occur while starting an app.
#[derive(Debug)]
pub enum LaunchError {
    /// The launcher program could not be run at all.
    Spawn(std::io::Error),
    /// The launcher exited unsuccessfully.
    Failed { code: Option<i32>, stderr: String },
    /// The launcher exited cleanly but reported an error on stderr.
    Reported(String),
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchError::Spawn(e) => write!(f, "could not run launcher: {e}"),
            LaunchError::Failed { code, stderr } => match code {
                Some(code) => write!(f, "launcher exited with status {code}: {stderr}"),
                None => write!(f, "launcher killed by signal: {stderr}"),
            },
            LaunchError::Reported(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for LaunchError {}

#[async_trait]
pub trait AppLauncher: Send + Sync {
    /// Starts the app. Without an activity the package's default activity is used.
    async fn launch(&self, package: &str, activity: Option<&str>) -> Result<(), LaunchError>;
}

/// Launches Android apps through the activity manager (`am start`).
#[derive(Debug, Clone)]
pub struct AmLauncher {
    program: String,
}

impl Default for AmLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl AmLauncher {
    pub fn new() -> Self {
        Self::with_program("am")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

/// Arguments for `am`: `start -n pkg/activity`, or `start pkg`.
pub fn start_args(package: &str, activity: Option<&str>) -> Vec<String> {
    match activity {
        Some(activity) => vec![
            "start".to_string(),
            "-n".to_string(),
            format!("{package}/{activity}"),
        ],
        None => vec!["start".to_string(), package.to_string()],
    }
}

#[async_trait]
impl AppLauncher for AmLauncher {
    async fn launch(&self, package: &str, activity: Option<&str>) -> Result<(), LaunchError> {
        let args = start_args(package, activity);
        info!("Launching: {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(LaunchError::Spawn)?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        debug!("Launcher exited with {} (stderr: {:?})", output.status, stderr);

        if !output.status.success() {
            return Err(LaunchError::Failed {
                code: output.status.code(),
                stderr,
            });
        }
        // `am` exits 0 even when the activity doesn't exist.
        if stderr.contains("Error") {
            return Err(LaunchError::Reported(stderr));
        }
        Ok(())
    }
}
