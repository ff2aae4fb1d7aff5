//! Per-episode record of the agent's moves

use serde::{Deserialize, Serialize};

use crate::types::{Action, Position};

/// A single step: where the agent was, what it asked for, where it landed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub from: Position,
    pub action: Action,
    pub to: Position,
    /// Reward observed on arrival at `to`
    pub reward: f64,
}

impl Transition {
    pub fn is_terminal(&self) -> bool {
        self.reward != 0.0
    }
}

/// Ordered steps of the current episode, cleared on every reset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    steps: Vec<Transition>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, transition: Transition) {
        self.steps.push(transition);
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Transition] {
        &self.steps
    }

    /// Cells arrived at, in visiting order.
    pub fn visited_positions(&self) -> impl DoubleEndedIterator<Item = Position> + '_ {
        self.steps.iter().map(|step| step.to)
    }

    /// (arrival cell, requested action) pairs, in visiting order.
    pub fn arrival_action_pairs(&self) -> impl DoubleEndedIterator<Item = (Position, Action)> + '_ {
        self.steps.iter().map(|step| (step.to, step.action))
    }
}
