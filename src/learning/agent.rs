//! Grid-world learning agent
//!
//! One agent type covers both learning modes. The update rule decides which
//! table it keeps and how a finished trajectory is backed up; the dynamics
//! decide whether requested moves can slip.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{
    config::{AgentConfig, Bootstrap},
    estimates::ValueEstimates,
    trajectory::{Trajectory, Transition},
};
use crate::{
    environment::{Grid, TransitionModel},
    error::{Error, Result},
    pipeline::{TrainingConfig, TrainingPipeline, TrainingResult},
    types::{Action, Position},
    utils::first_argmax,
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Terminal cell an episode ended on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeOutcome {
    Goal,
    Hazard,
}

/// Summary of one completed episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeReport {
    /// Zero-based index among completed episodes
    pub episode: usize,
    pub outcome: EpisodeOutcome,
    pub reward: f64,
    pub steps: usize,
}

/// Tabular agent exploring a [`Grid`].
///
/// # Examples
///
/// ```
/// use gridlearn::{Agent, AgentConfig, Grid, UpdateRule};
///
/// let config = AgentConfig::new(UpdateRule::QLearning).with_seed(7);
/// let mut agent = Agent::new(Grid::classic(), config)?;
/// let result = agent.train(50)?;
/// assert_eq!(result.episodes, 50);
/// # Ok::<(), gridlearn::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Agent {
    grid: Grid,
    config: AgentConfig,
    transitions: TransitionModel,
    estimates: ValueEstimates,
    position: Position,
    trajectory: Trajectory,
    completed_episodes: usize,
    rng: StdRng,
}

impl Agent {
    /// Create an agent standing on the grid's start cell.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if a hyperparameter is out of range.
    pub fn new(grid: Grid, config: AgentConfig) -> Result<Self> {
        config.validate()?;
        let transitions = TransitionModel::new(config.dynamics)?;
        let estimates = ValueEstimates::new(
            &grid,
            config.update_rule,
            config.learning_rate,
            config.discount_factor,
        );
        Ok(Self {
            position: grid.start(),
            rng: build_rng(config.seed),
            grid,
            config,
            transitions,
            estimates,
            trajectory: Trajectory::new(),
            completed_episodes: 0,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Episodes that reached a terminal cell since construction.
    pub fn completed_episodes(&self) -> usize {
        self.completed_episodes
    }

    /// Copy of the learned table.
    pub fn snapshot(&self) -> ValueEstimates {
        self.estimates.clone()
    }

    /// Choose the next action.
    ///
    /// With probability ε the agent acts greedily on its estimates, otherwise
    /// uniformly at random. Ties go to the earliest action in [`Action::ALL`].
    pub fn select_action(&mut self) -> Action {
        let random_action = Action::ALL[self.rng.random_range(0..Action::ALL.len())];
        if self.rng.random::<f64>() < self.config.epsilon {
            self.greedy_action()
        } else {
            random_action
        }
    }

    fn greedy_action(&mut self) -> Action {
        match &self.estimates {
            ValueEstimates::StateValues(table) => {
                // Look ahead through the transition model; under slippery
                // dynamics the lookahead itself may slip.
                let lookahead = Action::ALL.map(|action| {
                    let next = self.transitions.next_position(
                        &self.grid,
                        self.position,
                        action,
                        &mut self.rng,
                    );
                    table.get(next)
                });
                Action::ALL[first_argmax(&lookahead).unwrap_or(0)]
            }
            ValueEstimates::ActionValues(table) => table.greedy_action(self.position),
        }
    }

    /// Execute `action`, move the agent and record the step.
    pub fn step(&mut self, action: Action) -> Transition {
        let to = self
            .transitions
            .next_position(&self.grid, self.position, action, &mut self.rng);
        let transition = Transition {
            from: self.position,
            action,
            to,
            reward: self.grid.reward(to),
        };
        self.position = to;
        self.trajectory.push(transition);
        transition
    }

    /// Clear the trajectory, return to start and re-anchor the terminals.
    pub fn reset(&mut self) {
        self.trajectory.clear();
        self.position = self.grid.start();
        self.estimates.anchor_terminal(&self.grid);
    }

    /// Run one episode from the start cell to a terminal cell.
    ///
    /// `on_step` sees every step as `(step index, transition)`. On a terminal
    /// reward the trajectory is backed up into the table and the agent resets.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EpisodeStepLimit`] when the configured step bound is
    /// reached first. The agent is reset without touching the table.
    pub fn run_episode<F>(&mut self, mut on_step: F) -> Result<EpisodeReport>
    where
        F: FnMut(usize, &Transition) -> Result<()>,
    {
        // Steps taken by hand before the episode do not belong to it
        self.reset();
        loop {
            if self.trajectory.len() >= self.config.max_steps_per_episode {
                let steps = self.trajectory.len();
                warn!(steps, "episode hit the step limit; discarding trajectory");
                self.reset();
                return Err(Error::EpisodeStepLimit { steps });
            }

            let action = self.select_action();
            let transition = self.step(action);
            if let Err(err) = on_step(self.trajectory.len() - 1, &transition) {
                self.reset();
                return Err(err);
            }

            if transition.is_terminal() {
                let report = EpisodeReport {
                    episode: self.completed_episodes,
                    outcome: if transition.to == self.grid.goal() {
                        EpisodeOutcome::Goal
                    } else {
                        EpisodeOutcome::Hazard
                    },
                    reward: transition.reward,
                    steps: self.trajectory.len(),
                };
                self.backup(transition.reward);
                self.completed_episodes += 1;
                self.reset();
                debug!(
                    episode = report.episode,
                    outcome = ?report.outcome,
                    steps = report.steps,
                    "episode finished"
                );
                return Ok(report);
            }
        }
    }

    /// Train until `episodes` episodes have reached a terminal cell.
    pub fn train(&mut self, episodes: usize) -> Result<TrainingResult> {
        TrainingPipeline::new(TrainingConfig::new(episodes)).run(self)
    }

    /// Propagate the terminal reward backwards over the trajectory.
    fn backup(&mut self, reward: f64) {
        match &mut self.estimates {
            ValueEstimates::StateValues(table) => {
                for position in self.trajectory.visited_positions().rev() {
                    table.backup(position, reward);
                }
            }
            ValueEstimates::ActionValues(table) => match self.config.bootstrap {
                Bootstrap::SameState => {
                    for (position, action) in self.trajectory.arrival_action_pairs().rev() {
                        table.same_state_update(position, action, reward);
                    }
                }
                Bootstrap::Successor => {
                    for step in self.trajectory.steps().iter().rev() {
                        let next_state = (!step.is_terminal()).then_some(step.to);
                        table.q_learning_update(step.from, step.action, step.reward, next_state);
                    }
                }
            },
        }
    }
}
