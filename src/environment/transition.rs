//! Transition model: intended action -> resulting cell

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use crate::{
    error::{Error, Result},
    types::{Action, Position},
    utils::weighted_sample,
};

/// Probability that a slippery move executes the requested action.
pub const DEFAULT_INTENDED_PROBABILITY: f64 = 0.75;

/// How requested actions turn into executed actions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Dynamics {
    /// The requested action is always executed.
    #[default]
    Deterministic,
    /// The requested action is executed with `intended_probability`; each of
    /// the other three actions takes an equal share of the remainder.
    Slippery { intended_probability: f64 },
}

impl Dynamics {
    pub fn slippery() -> Self {
        Dynamics::Slippery {
            intended_probability: DEFAULT_INTENDED_PROBABILITY,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            Dynamics::Deterministic => Ok(()),
            Dynamics::Slippery {
                intended_probability: p,
            } if (0.0..=1.0).contains(&p) => Ok(()),
            Dynamics::Slippery {
                intended_probability: p,
            } => Err(Error::invalid_parameter(
                "intended_probability",
                p,
                "must lie in [0, 1]",
            )),
        }
    }
}

/// Computes where an action leads.
///
/// The model has no state of its own; randomness comes from the caller's
/// generator so one agent keeps one reproducible stream.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransitionModel {
    dynamics: Dynamics,
}

impl TransitionModel {
    pub fn new(dynamics: Dynamics) -> Result<Self> {
        dynamics.validate()?;
        Ok(Self { dynamics })
    }

    pub fn deterministic() -> Self {
        Self {
            dynamics: Dynamics::Deterministic,
        }
    }

    /// Draw the action that physically happens when `intended` is requested.
    pub fn executed_action<R: Rng + ?Sized>(&self, intended: Action, rng: &mut R) -> Action {
        match self.dynamics {
            Dynamics::Deterministic => intended,
            Dynamics::Slippery {
                intended_probability,
            } => {
                let other = (1.0 - intended_probability) / (Action::ALL.len() - 1) as f64;
                let weighted = Action::ALL.map(|action| {
                    let weight = if action == intended {
                        intended_probability
                    } else {
                        other
                    };
                    (action, weight)
                });
                weighted_sample(rng, &weighted).unwrap_or(intended)
            }
        }
    }

    /// Move one cell in the direction of `action`, staying put when the
    /// target is off the board or blocked.
    pub fn apply(grid: &Grid, current: Position, action: Action) -> Position {
        match current.offset(action.delta()) {
            Some(next) if grid.is_open(next) => next,
            _ => current,
        }
    }

    /// Resulting cell after requesting `action` from `current`.
    ///
    /// Under slippery dynamics the substitution happens before the move, so
    /// repeated calls with the same inputs may land on different cells.
    pub fn next_position<R: Rng + ?Sized>(
        &self,
        grid: &Grid,
        current: Position,
        action: Action,
        rng: &mut R,
    ) -> Position {
        let executed = self.executed_action(action, rng);
        Self::apply(grid, current, executed)
    }
}
