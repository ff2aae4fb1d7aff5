//! State-value table for TD(0) policy evaluation

use std::collections::HashMap;

use crate::{environment::Grid, types::Position, utils::round_to};

/// Decimal digits kept after every state-value update.
pub const STATE_VALUE_DIGITS: u32 = 3;

/// Estimates V(s) for every cell of a grid.
///
/// Every cell is populated at construction, so lookups never insert.
#[derive(Debug, Clone, PartialEq)]
pub struct StateValueTable {
    values: HashMap<Position, f64>,
    /// Learning rate α
    learning_rate: f64,
}

impl StateValueTable {
    /// Zero-initialized table over every cell of `grid`, with terminals anchored.
    pub fn new(grid: &Grid, learning_rate: f64) -> Self {
        let mut table = Self {
            values: grid.cells().map(|cell| (cell, 0.0)).collect(),
            learning_rate,
        };
        table.anchor_terminal(grid);
        table
    }

    /// Value of a position, 0 for cells the table does not know.
    pub fn get(&self, position: Position) -> f64 {
        self.values.get(&position).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, position: Position, value: f64) {
        self.values.insert(position, value);
    }

    /// Pin the goal to +1 and the hazard to -1.
    pub fn anchor_terminal(&mut self, grid: &Grid) {
        self.set(grid.goal(), grid.reward(grid.goal()));
        self.set(grid.hazard(), grid.reward(grid.hazard()));
    }

    /// Move V(s) toward the episode's terminal reward.
    ///
    /// V(s) ← V(s) + α[R - V(s)], with the same R for every visited state.
    pub fn backup(&mut self, position: Position, reward: f64) {
        let current = self.get(position);
        let updated = current + self.learning_rate * (reward - current);
        self.set(position, round_to(updated, STATE_VALUE_DIGITS));
    }

    /// Entries sorted by position.
    pub fn iter(&self) -> impl Iterator<Item = (Position, f64)> + '_ {
        let mut entries: Vec<_> = self.values.iter().map(|(&p, &v)| (p, v)).collect();
        entries.sort_by_key(|(p, _)| *p);
        entries.into_iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
