//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.appsbar/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AppsbarConfig {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub style: StyleConfig,
    #[serde(default)]
    pub behavior: BehaviorConfig,
    #[serde(default)]
    pub apps: Vec<AppConfig>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GridConfig {
    pub rows: Option<i32>,
    pub columns: Option<i32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StyleConfig {
    pub border: Option<bool>,
    pub padding: Option<u16>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BehaviorConfig {
    pub close_on_launch: Option<bool>,
    pub resize_policy: Option<ResizePolicy>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub name: String,
    pub icon: Option<String>,
    #[serde(default)]
    pub package: String,
    pub activity: Option<String>,
    pub icon_scale: Option<f64>,
}

/// What to do with terminal resizes after the first geometry report.
///
/// Soft keyboards on Android resize the terminal every time they open, so
/// the default is to keep the first layout.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizePolicy {
    /// Keep the first geometry for the whole session.
    #[default]
    Ignore,
    /// Take the new cell dimensions, keep the measured pixels-per-cell.
    Reflow,
    /// Take the new cell dimensions and re-measure pixels-per-cell.
    Requery,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_ROWS: i32 = 1;
pub const DEFAULT_COLUMNS: i32 = 5;
pub const DEFAULT_BORDER: bool = true;
pub const DEFAULT_PADDING: u16 = 1;
pub const CONFIG_ENV_VAR: &str = "APPSBAR_CONFIG";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

/// Grid layout in cells. Rows or columns `<= 0` disable the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    pub rows: i32,
    pub columns: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSpec {
    pub border: bool,
    pub padding: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Behavior {
    pub close_on_launch: bool,
    pub resize_policy: ResizePolicy,
}

/// One launchable app, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct AppEntry {
    pub name: String,
    pub icon: Option<PathBuf>,
    pub package: String,
    pub activity: Option<String>,
    pub icon_scale: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub grid: GridSpec,
    pub style: StyleSpec,
    pub behavior: Behavior,
    pub apps: Vec<AppEntry>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve(&AppsbarConfig::default(), &CliOverrides::default())
    }
}

/// Values given on the command line. `None`/`false` means "not specified".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub close_on_launch: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the config path: CLI flag → `APPSBAR_CONFIG` → `~/.appsbar/config.toml`.
pub fn config_path(cli_path: Option<&Path>) -> Option<PathBuf> {
    cli_path
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
        .or_else(|| dirs::home_dir().map(|h| h.join(".appsbar").join("config.toml")))
}

/// Load config from `path`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `AppsbarConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config(path: Option<&Path>) -> Result<AppsbarConfig, ConfigError> {
    let path = match path {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(AppsbarConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(AppsbarConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<AppsbarConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# appsbar configuration
# All settings are optional. Defaults are used for anything not specified.

# [grid]
# rows = 1
# columns = 5

# [style]
# border = true
# padding = 1

# [behavior]
# close_on_launch = false
# resize_policy = "ignore"           # "ignore", "reflow" or "requery"

# [[apps]]
# name = "Browser"
# icon = "~/.appsbar/icons/browser.png"
# package = "org.mozilla.firefox"

# [[apps]]
# name = "Terminal"
# icon = "~/.appsbar/icons/termux.png"
# package = "com.termux"
# activity = "com.termux.app.TermuxActivity"
# icon_scale = 0.8
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → CLI.
///
/// Apps without a package are dropped here so the rest of the program can
/// assume every entry is launchable.
pub fn resolve(config: &AppsbarConfig, cli: &CliOverrides) -> ResolvedConfig {
    let grid = GridSpec {
        rows: config.grid.rows.unwrap_or(DEFAULT_ROWS),
        columns: config.grid.columns.unwrap_or(DEFAULT_COLUMNS),
    };
    if grid.rows <= 0 || grid.columns <= 0 {
        warn!(
            "Grid {}x{} has no cells, nothing will be drawn",
            grid.rows, grid.columns
        );
    }

    let style = StyleSpec {
        border: config.style.border.unwrap_or(DEFAULT_BORDER),
        padding: config.style.padding.unwrap_or(DEFAULT_PADDING),
    };

    let behavior = Behavior {
        close_on_launch: cli.close_on_launch
            || config.behavior.close_on_launch.unwrap_or(false),
        resize_policy: config.behavior.resize_policy.unwrap_or_default(),
    };

    let apps = config
        .apps
        .iter()
        .filter_map(|app| {
            if app.package.trim().is_empty() {
                warn!("Skipping app '{}': no package configured", app.name);
                return None;
            }
            Some(AppEntry {
                name: app.name.clone(),
                icon: app
                    .icon
                    .as_deref()
                    .filter(|p| !p.trim().is_empty())
                    .map(expand_home),
                package: app.package.trim().to_string(),
                activity: app
                    .activity
                    .as_deref()
                    .map(str::trim)
                    .filter(|a| !a.is_empty())
                    .map(str::to_string),
                icon_scale: app.icon_scale,
            })
        })
        .collect();

    ResolvedConfig {
        grid,
        style,
        behavior,
        apps,
    }
}

/// Expands a leading `~/` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
