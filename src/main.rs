use appsbar::core::config::{self, CliOverrides};
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "appsbar", about = "Touch-friendly app launcher for the terminal")]
struct Args {
    /// Config file (defaults to $APPSBAR_CONFIG, then ~/.appsbar/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write the log
    #[arg(long, default_value = "appsbar.log")]
    log_file: PathBuf,

    /// Log verbosity (off, error, warn, info, debug, trace)
    #[arg(long, default_value_t = LevelFilter::Debug)]
    log_level: LevelFilter,

    /// Exit after an app launches successfully
    #[arg(long)]
    close_on_launch: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    // The terminal belongs to the TUI, so logs go to a file
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(args.log_level, log_config, log_file);
    }

    let path = config::config_path(args.config.as_deref());
    match &path {
        Some(p) => log::info!("Appsbar starting up with config {}", p.display()),
        None => log::info!("Appsbar starting up without a config path"),
    }

    let raw = match config::load_config(path.as_deref()) {
        Ok(raw) => raw,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("appsbar: {e}");
            return Err(std::io::Error::other(e.to_string()));
        }
    };
    let overrides = CliOverrides {
        close_on_launch: args.close_on_launch,
    };
    let resolved = config::resolve(&raw, &overrides);
    log::info!(
        "Loaded {} apps on a {}x{} grid",
        resolved.apps.len(),
        resolved.grid.rows,
        resolved.grid.columns
    );

    appsbar::tui::run(resolved)
}
