//! Grid world environment
//!
//! The grid is a passive description of the board; the transition model turns
//! an intended action into the cell the agent actually lands on.

pub mod grid;
pub mod transition;

pub use grid::Grid;
pub use transition::{DEFAULT_INTENDED_PROBABILITY, Dynamics, TransitionModel};
