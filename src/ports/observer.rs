//! Observer port - abstraction for training observation and data collection
//!
//! This port defines the interface for observing training events,
//! allowing composable data collection without coupling the episode
//! loop to specific output formats or metrics.

use crate::{
    Result,
    learning::{EpisodeReport, Transition},
    pipeline::TrainingResult,
};

/// Observer trait for monitoring training
///
/// Observers can be composed to collect different types of data during training:
/// - Progress bars for user feedback
/// - JSONL export of episode paths
/// - Metrics tracking
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - Once at the beginning
/// 2. For each attempted episode:
///    - `on_episode_start(episode)`
///    - `on_step(...)` - For each step taken
///    - `on_episode_end(report)` or `on_episode_aborted(...)`
/// 3. `on_training_end(result)` - Once at the end
///
/// An aborted episode is retried under the same episode number.
///
/// # Examples
///
/// ```no_run
/// use gridlearn::{learning::EpisodeReport, ports::Observer};
///
/// struct GoalCounter {
///     goals: usize,
/// }
///
/// impl Observer for GoalCounter {
///     fn on_episode_end(&mut self, report: &EpisodeReport) -> gridlearn::Result<()> {
///         if report.reward > 0.0 {
///             self.goals += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer {
    /// Called once before the first episode.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode (or a retry of an aborted one) starts.
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called after every step, before any value update.
    ///
    /// # Parameters
    ///
    /// * `episode` - Index of the current episode
    /// * `step` - Step number within the episode (0-based)
    /// * `transition` - The step just taken
    fn on_step(&mut self, _episode: usize, _step: usize, _transition: &Transition) -> Result<()> {
        Ok(())
    }

    /// Called after the trajectory of a finished episode has been backed up.
    fn on_episode_end(&mut self, _report: &EpisodeReport) -> Result<()> {
        Ok(())
    }

    /// Called when an episode hits the step limit and is discarded.
    fn on_episode_aborted(&mut self, _episode: usize, _steps: usize) -> Result<()> {
        Ok(())
    }

    /// Called once after the last episode.
    fn on_training_end(&mut self, _result: &TrainingResult) -> Result<()> {
        Ok(())
    }
}
