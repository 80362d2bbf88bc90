//! cohortcall - learner submission summaries and call reports from CSV exports.

mod app;
mod cli;
mod output;

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::App;
use cli::{Cli, Command};

/// Log file written when `--log-dir` is given
const LOG_FILE: &str = "cohortcall.log";

/// Initialize the tracing subscriber for logging.
///
/// The returned guard must live until exit so buffered file logs are flushed.
fn init_tracing(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(dir, LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();
    Ok(guard)
}

fn run(cli: Cli) -> Result<()> {
    let mut app = App::new(&cli.columns)?;
    match cli.command {
        Command::Inspect { file } => app.inspect(&file),
        Command::Summary { file, selection } => app.summary(&file, &selection),
        Command::Report {
            file,
            selection,
            out,
            json,
        } => app.report(&file, &selection, out, json),
        Command::Remark {
            file,
            email,
            cohort,
            submission,
            text,
        } => app.remark(&file, &email, &cohort, &submission, &text),
        Command::Map { field, letter } => app.map(field, letter),
        Command::Session { action } => app.session(action),
        Command::Uploads => app.uploads(),
    }
}

fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let guard = match init_tracing(cli.log_dir.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    info!("cohortcall starting");

    let result = run(cli);
    // Flush file logs before a possible exit
    drop(guard);
    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
