//! Observer pattern for training pipelines
//!
//! Observers allow composable data collection during training without coupling
//! the episode loop to specific output formats.

use std::{
    cell::RefCell,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    rc::Rc,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use super::training::TrainingResult;
use crate::{
    Result,
    learning::{EpisodeOutcome, EpisodeReport, Transition},
    ports::Observer,
    types::{Action, Position},
};

/// Observation of a single step during an episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepObservation {
    pub step: usize,
    pub from: Position,
    pub action: Action,
    pub to: Position,
}

/// Complete observation of a finished episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeObservation {
    pub episode: usize,
    pub outcome: EpisodeOutcome,
    pub reward: f64,
    pub steps: Vec<StepObservation>,
}

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    goals: usize,
    hazards: usize,
    aborted: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            goals: 0,
            hazards: 0,
            aborted: 0,
        }
    }

    fn message(&self) -> String {
        format!("{} H:{} A:{}", self.goals, self.hazards, self.aborted)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes (G:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, report: &EpisodeReport) -> Result<()> {
        match report.outcome {
            EpisodeOutcome::Goal => self.goals += 1,
            EpisodeOutcome::Hazard => self.hazards += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.inc(1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_episode_aborted(&mut self, _episode: usize, _steps: usize) -> Result<()> {
        self.aborted += 1;
        if let Some(pb) = &self.progress_bar {
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self, _result: &TrainingResult) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks outcome counts and episode lengths
#[derive(Debug, Clone, Default)]
pub struct MetricsObserver {
    goals: usize,
    hazards: usize,
    aborted: usize,
    episode_lengths: Vec<usize>,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    pub fn completed(&self) -> usize {
        self.episode_lengths.len()
    }

    pub fn goals(&self) -> usize {
        self.goals
    }

    pub fn hazards(&self) -> usize {
        self.hazards
    }

    pub fn aborted(&self) -> usize {
        self.aborted
    }

    /// Fraction of completed episodes that reached the goal
    pub fn goal_rate(&self) -> f64 {
        if self.episode_lengths.is_empty() {
            0.0
        } else {
            self.goals as f64 / self.episode_lengths.len() as f64
        }
    }

    pub fn episode_lengths(&self) -> &[usize] {
        &self.episode_lengths
    }

    /// Mean length of the last `window` completed episodes
    pub fn recent_mean_length(&self, window: usize) -> Option<f64> {
        let start = self.episode_lengths.len().saturating_sub(window);
        let recent = &self.episode_lengths[start..];
        if recent.is_empty() {
            None
        } else {
            Some(recent.iter().sum::<usize>() as f64 / recent.len() as f64)
        }
    }
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, report: &EpisodeReport) -> Result<()> {
        match report.outcome {
            EpisodeOutcome::Goal => self.goals += 1,
            EpisodeOutcome::Hazard => self.hazards += 1,
        }
        self.episode_lengths.push(report.steps);
        Ok(())
    }

    fn on_episode_aborted(&mut self, _episode: usize, _steps: usize) -> Result<()> {
        self.aborted += 1;
        Ok(())
    }
}

/// Lets a caller keep reading an observer after handing it to a pipeline.
pub struct SharedObserver<O: Observer>(pub Rc<RefCell<O>>);

impl<O: Observer> SharedObserver<O> {
    pub fn new(observer: O) -> (Self, Rc<RefCell<O>>) {
        let shared = Rc::new(RefCell::new(observer));
        (Self(Rc::clone(&shared)), shared)
    }
}

impl<O: Observer> Observer for SharedObserver<O> {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        self.0.borrow_mut().on_training_start(total_episodes)
    }

    fn on_episode_start(&mut self, episode: usize) -> Result<()> {
        self.0.borrow_mut().on_episode_start(episode)
    }

    fn on_step(&mut self, episode: usize, step: usize, transition: &Transition) -> Result<()> {
        self.0.borrow_mut().on_step(episode, step, transition)
    }

    fn on_episode_end(&mut self, report: &EpisodeReport) -> Result<()> {
        self.0.borrow_mut().on_episode_end(report)
    }

    fn on_episode_aborted(&mut self, episode: usize, steps: usize) -> Result<()> {
        self.0.borrow_mut().on_episode_aborted(episode, steps)
    }

    fn on_training_end(&mut self, result: &TrainingResult) -> Result<()> {
        self.0.borrow_mut().on_training_end(result)
    }
}

/// JSONL observer - Writes one line per finished episode with its full path
pub struct JsonlObserver {
    writer: BufWriter<File>,
    current_steps: Vec<StepObservation>,
}

impl JsonlObserver {
    /// Create a new JSONL observer
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            current_steps: Vec::new(),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        self.current_steps.clear();
        Ok(())
    }

    fn on_step(&mut self, _episode: usize, step: usize, transition: &Transition) -> Result<()> {
        self.current_steps.push(StepObservation {
            step,
            from: transition.from,
            action: transition.action,
            to: transition.to,
        });
        Ok(())
    }

    fn on_episode_end(&mut self, report: &EpisodeReport) -> Result<()> {
        let observation = EpisodeObservation {
            episode: report.episode,
            outcome: report.outcome,
            reward: report.reward,
            steps: std::mem::take(&mut self.current_steps),
        };

        serde_json::to_writer(&mut self.writer, &observation)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_training_end(&mut self, _result: &TrainingResult) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
