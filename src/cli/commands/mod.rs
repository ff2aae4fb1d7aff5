//! CLI command implementations

pub mod show_grid;
pub mod train;
