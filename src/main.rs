mod cli;
#[cfg(feature = "tui")]
mod orchestrator;
mod routines;
#[cfg(feature = "tui")]
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    if cfg!(feature = "tui") && args.is_interactive() {
        // Keep log lines off the alternate screen.
        let cfg = cli::build_config(&args);
        init_file_logging(&cfg.state_file.with_file_name("auton-selector.log"), level)?;
    } else {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    cli::run(args).await
}

fn init_file_logging(path: &Path, level: Level) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
