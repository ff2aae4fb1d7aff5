//! Training pipeline for grid-world agents

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    Error, Result,
    learning::{Agent, EpisodeOutcome},
    ports::Observer,
};

/// Training configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of episodes that must reach a terminal cell
    pub num_episodes: usize,

    /// Aborted episodes tolerated in a row before training gives up
    pub max_consecutive_aborts: usize,
}

impl TrainingConfig {
    pub fn new(num_episodes: usize) -> Self {
        Self {
            num_episodes,
            ..Self::default()
        }
    }

    pub fn with_max_consecutive_aborts(mut self, max: usize) -> Self {
        self.max_consecutive_aborts = max;
        self
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_episodes: 5000,
            max_consecutive_aborts: 1000,
        }
    }
}

/// Result of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Episodes that reached a terminal cell
    pub episodes: usize,

    /// Episodes that ended on the goal
    pub goals: usize,

    /// Episodes that ended on the hazard
    pub hazards: usize,

    /// Episodes discarded at the step limit and retried
    pub aborted: usize,

    /// Steps taken over all completed episodes
    pub total_steps: usize,

    /// Fraction of completed episodes that reached the goal
    pub goal_rate: f64,

    /// Average length of a completed episode
    pub mean_steps: f64,
}

impl TrainingResult {
    /// Create a new training result
    pub fn new(goals: usize, hazards: usize, aborted: usize, total_steps: usize) -> Self {
        let episodes = goals + hazards;
        let (goal_rate, mean_steps) = if episodes > 0 {
            (
                goals as f64 / episodes as f64,
                total_steps as f64 / episodes as f64,
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            episodes,
            goals,
            hazards,
            aborted,
            total_steps,
            goal_rate,
            mean_steps,
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Runs episodes on an agent and reports them to observers
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Train until exactly `num_episodes` episodes have reached a terminal cell.
    ///
    /// Episodes cut off by the agent's step limit are retried and do not
    /// count toward the total.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TrainingStalled`] once more than
    /// `max_consecutive_aborts` episodes in a row are cut off, and propagates
    /// any observer error.
    pub fn run(&mut self, agent: &mut Agent) -> Result<TrainingResult> {
        info!(
            episodes = self.config.num_episodes,
            rule = ?agent.config().update_rule,
            dynamics = ?agent.config().dynamics,
            "training started"
        );

        for observer in &mut self.observers {
            observer.on_training_start(self.config.num_episodes)?;
        }

        let mut goals = 0;
        let mut hazards = 0;
        let mut aborted = 0;
        let mut consecutive_aborts = 0;
        let mut total_steps = 0;
        let mut completed = 0;

        while completed < self.config.num_episodes {
            let episode = completed;
            for observer in &mut self.observers {
                observer.on_episode_start(episode)?;
            }

            let observers = &mut self.observers;
            let outcome = agent.run_episode(|step, transition| {
                for observer in observers.iter_mut() {
                    observer.on_step(episode, step, transition)?;
                }
                Ok(())
            });

            match outcome {
                Ok(report) => {
                    consecutive_aborts = 0;
                    total_steps += report.steps;
                    match report.outcome {
                        EpisodeOutcome::Goal => goals += 1,
                        EpisodeOutcome::Hazard => hazards += 1,
                    }
                    for observer in &mut self.observers {
                        observer.on_episode_end(&report)?;
                    }
                    completed += 1;
                }
                Err(Error::EpisodeStepLimit { steps }) => {
                    aborted += 1;
                    consecutive_aborts += 1;
                    for observer in &mut self.observers {
                        observer.on_episode_aborted(episode, steps)?;
                    }
                    if consecutive_aborts > self.config.max_consecutive_aborts {
                        warn!(consecutive_aborts, "giving up on training");
                        return Err(Error::TrainingStalled {
                            aborted: consecutive_aborts,
                        });
                    }
                }
                Err(err) => return Err(err),
            }
        }

        let result = TrainingResult::new(goals, hazards, aborted, total_steps);

        for observer in &mut self.observers {
            observer.on_training_end(&result)?;
        }

        info!(
            episodes = result.episodes,
            goals = result.goals,
            hazards = result.hazards,
            aborted = result.aborted,
            "training finished"
        );

        Ok(result)
    }
}
