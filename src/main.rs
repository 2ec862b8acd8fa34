//! libcat - library catalog shell
//!
//! Reads commands from stdin until end of input.

use std::io::{self, Write};

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use libcat::{
    config::{AppConfig, LogFormat},
    services::{Library, SystemClock},
    shell::Shell,
};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Logs go to stderr so they never mix with command output
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("libcat={}", config.logging.level).into());
    let registry = tracing_subscriber::registry().with(filter);
    match config.logging.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
    }

    tracing::info!("Starting libcat v{}", env!("CARGO_PKG_VERSION"));

    let mut library = Library::new(Box::new(SystemClock));
    if let Some(date) = config.shell.start_date {
        library.set_current_date(date);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "Library CLI. Type 'help' for the list of commands. Ctrl+D to exit.")?;

    let mut shell = Shell::new(library, &config.shell);
    shell
        .run(stdin.lock(), &mut out)
        .context("Shell I/O failed")?;

    Ok(())
}
