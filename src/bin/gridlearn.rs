//! gridlearn CLI - Tabular reinforcement learning on small grid worlds
//!
//! This CLI provides:
//! - Training with policy evaluation or Q-learning, deterministic or slippery
//! - Text, JSON and CSV views of the learned table
//! - Inspection of the board layout

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gridlearn")]
#[command(version, about = "Tabular reinforcement learning on grid worlds", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train an agent and print what it learned
    Train(Box<gridlearn::cli::commands::train::TrainArgs>),

    /// Print the grid layout
    ShowGrid(gridlearn::cli::commands::show_grid::ShowGridArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Train(args) => gridlearn::cli::commands::train::execute(*args),
        Commands::ShowGrid(args) => gridlearn::cli::commands::show_grid::execute(args),
    }
}
