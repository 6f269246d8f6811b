//! Command-line tool for saved loadouts.
//!
//! Loadouts are stored one file per loadout in the data directory. Item and
//! category content comes from `LOADOUT_CONTENT_DIR` or, when unset, from the
//! content built into the binary.

mod commands;
mod config;
mod dirs;
mod repository;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use commands::{Check, Context, CopyLoadout, Import, Inspect, List, Remove};
use config::CliConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Inspect and maintain saved loadouts
#[derive(Parser)]
#[command(name = "loadout")]
#[command(about = "Inspect and maintain saved loadouts", long_about = None)]
#[command(version)]
struct Cli {
    /// Custom data directory (defaults to LOADOUT_DATA_DIR or a platform-specific location)
    #[arg(short, long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// List saved loadouts
    List(List),

    /// Import a loadout from a RON file
    Import(Import),

    /// Print a saved loadout
    Inspect(Inspect),

    /// Duplicate a saved loadout under a new label
    Copy(CopyLoadout),

    /// Delete a saved loadout
    Remove(Remove),

    /// Compare an inventory against a saved loadout
    Check(Check),
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let mut config = CliConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    let _guard = setup_logging(&config)?;
    let ctx = Context::open(&config)?;

    match cli.command {
        Command::List(cmd) => cmd.execute(&ctx),
        Command::Import(cmd) => cmd.execute(&ctx),
        Command::Inspect(cmd) => cmd.execute(&ctx),
        Command::Copy(cmd) => cmd.execute(&ctx),
        Command::Remove(cmd) => cmd.execute(&ctx),
        Command::Check(cmd) => cmd.execute(&ctx),
    }
}

/// Setup logging to stderr, and to a file when `LOADOUT_LOG_TO_FILE` is set.
///
/// The returned guard flushes the file writer on drop.
fn setup_logging(config: &CliConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = if config.log_to_file {
        let log_dir = dirs::log_dir();
        std::fs::create_dir_all(&log_dir)?;
        let file_appender = tracing_appender::rolling::daily(&log_dir, "loadout.log");
        let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking_file)
            .with_ansi(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if config.log_to_file {
        tracing::debug!(dir = %dirs::log_dir().display(), "file logging enabled");
    }

    Ok(guard)
}
