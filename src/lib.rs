//! Tabular reinforcement learning on small grid worlds
//!
//! This crate provides:
//! - A validated grid world with a goal, a hazard and impassable obstacles
//! - Deterministic and slippery transition models
//! - A learning agent that estimates state values by policy evaluation or
//!   action values by Q-learning
//! - A training pipeline with composable observers
//! - Text, JSON and CSV reporting of learned tables

pub mod cli;
pub mod environment;
pub mod error;
pub mod learning;
pub mod pipeline;
pub mod ports;
pub mod report;
pub mod types;
pub mod utils;

pub use environment::{Dynamics, Grid, TransitionModel};
pub use error::{Error, Result};
pub use learning::{Agent, AgentConfig, Bootstrap, UpdateRule, ValueEstimates};
pub use pipeline::{TrainingConfig, TrainingPipeline, TrainingResult};
pub use types::{Action, Position};
