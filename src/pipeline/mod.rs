//! Training pipeline abstractions
//!
//! This module provides:
//! - The episode loop that drives an agent to a fixed number of finished episodes
//! - Observer adapters for progress, metrics and JSONL export

pub mod observers;
pub mod training;

pub use observers::{
    EpisodeObservation, JsonlObserver, MetricsObserver, ProgressObserver, SharedObserver,
    StepObservation,
};
pub use training::{TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::Observer;
