//! Occupancy board CLI
//!
//! Headless host for the board: watches live status, prints usage charts and
//! toggles the emergency mode.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use occupancy_board::controller::CycleOutcome;
use occupancy_board::{load_config, run, Board, Config};
use tracing::Level;

#[derive(Parser)]
#[command(name = "occupancy-board")]
#[command(about = "Live facility occupancy board")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config file)
    #[arg(long)]
    base_url: Option<String>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Poll the status endpoint until interrupted (default)
    Watch,
    /// Fetch and render the status once
    Status,
    /// Fetch the usage log and print the charts
    Logs {
        /// Number of days to look back (overrides config file)
        #[arg(long)]
        days: Option<u32>,
    },
    /// Toggle the server's emergency stop / resume mode
    Emergency,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, base_url={:?}, command={:?}",
        args.config,
        args.base_url,
        args.command
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    if let Some(base_url) = args.base_url {
        config.api.base_url = base_url;
    }

    match args.command.unwrap_or(Command::Watch) {
        Command::Watch => {
            tracing::info!("Starting occupancy board");
            run(config).await?;
        }
        Command::Status => {
            let board = Board::from_config(config)?;
            let mut controller = board.status_controller();
            if controller.run_once().await == CycleOutcome::Degraded {
                return Err("status fetch failed".into());
            }
        }
        Command::Logs { days } => {
            if let Some(days) = days {
                config.logs.days = days;
            }
            let board = Board::from_config(config)?;
            let today = chrono::Local::now().date_naive();
            board.fetch_logs(today).await?;
        }
        Command::Emergency => {
            let board = Board::from_config(config)?;
            board.toggle_emergency().await?;
        }
    }

    Ok(())
}
