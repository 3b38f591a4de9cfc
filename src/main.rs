//! Binary entry point: parse options, route logs to a file, and hand the
//! terminal to the operator console.
use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hymn_projector::{run_app, App, Cli, Settings};

fn main() -> Result<()> {
    let settings = Settings::from_cli(Cli::parse())?;
    init_logging(&settings)?;

    tracing::info!(
        songs = %settings.songs_path.display(),
        verses = %settings.verses_path.display(),
        "starting console"
    );

    let mut app = App::new(settings);
    run_app(&mut app)
}

/// The console owns stdout, so logs go to a file instead.
fn init_logging(settings: &Settings) -> Result<()> {
    if let Some(parent) = settings.log_path.parent() {
        fs::create_dir_all(parent).context("failed to create log directory")?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&settings.log_path)
        .with_context(|| format!("failed to open log file {}", settings.log_path.display()))?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("HYMN_PROJECTOR_LOG")
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}
