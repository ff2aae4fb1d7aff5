//! Show-grid command - Print the board an experiment would train on

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::{
        config::ExperimentConfig,
        output::{print_kv, print_section},
    },
    report,
};

#[derive(Parser, Debug)]
#[command(about = "Print the grid layout")]
pub struct ShowGridArgs {
    /// JSON experiment file holding the grid
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
}

pub fn execute(args: ShowGridArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => ExperimentConfig::load(path)
            .with_context(|| format!("loading experiment config {}", path.display()))?,
        None => ExperimentConfig::default(),
    };
    let grid = config.grid.build().context("invalid grid")?;

    print_section(&format!("Grid {}x{}", grid.rows(), grid.cols()));
    print_kv("Start", &grid.start().to_string());
    print_kv("Goal (+1)", &grid.goal().to_string());
    print_kv("Hazard (-1)", &grid.hazard().to_string());
    print_kv("Obstacles", &grid.obstacles().len().to_string());
    println!();
    print!("{}", report::render_grid(&grid));
    Ok(())
}
