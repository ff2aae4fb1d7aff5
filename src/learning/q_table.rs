//! Q-table for action-value learning

use std::collections::HashMap;

use crate::{
    environment::Grid,
    types::{Action, Position},
    utils::{first_argmax, round_to},
};

/// Decimal digits kept after every Q-value update.
pub const Q_VALUE_DIGITS: u32 = 2;

/// Q-table mapping (cell, action) pairs to Q-values
///
/// Every pair on the grid is populated at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    /// Q-values: (position, action) -> Q-value
    q_values: HashMap<(Position, Action), f64>,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
}

impl QTable {
    /// Create a zero-initialized Q-table over `grid` with terminals anchored.
    pub fn new(grid: &Grid, learning_rate: f64, discount_factor: f64) -> Self {
        let q_values = grid
            .cells()
            .flat_map(|cell| Action::ALL.map(|action| ((cell, action), 0.0)))
            .collect();
        let mut table = Self {
            q_values,
            learning_rate,
            discount_factor,
        };
        table.anchor_terminal(grid);
        table
    }

    /// Get Q-value for a state-action pair (0 if never populated)
    pub fn get(&self, state: Position, action: Action) -> f64 {
        self.q_values
            .get(&(state, action))
            .copied()
            .unwrap_or(0.0)
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: Position, action: Action, value: f64) {
        self.q_values.insert((state, action), value);
    }

    /// Q-values of a state in [`Action::ALL`] order
    pub fn action_values(&self, state: Position) -> [f64; 4] {
        Action::ALL.map(|action| self.get(state, action))
    }

    /// Maximum Q-value over all actions in a state
    pub fn max_q(&self, state: Position) -> f64 {
        self.action_values(state)
            .into_iter()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Greedy action; ties go to the earliest action in [`Action::ALL`]
    pub fn greedy_action(&self, state: Position) -> Action {
        let index = first_argmax(&self.action_values(state)).unwrap_or(0);
        Action::ALL[index]
    }

    /// Pin every action at the goal to +1 and at the hazard to -1.
    pub fn anchor_terminal(&mut self, grid: &Grid) {
        for action in Action::ALL {
            self.set(grid.goal(), action, grid.reward(grid.goal()));
            self.set(grid.hazard(), action, grid.reward(grid.hazard()));
        }
    }

    /// Backup that bootstraps from the same state's best action
    ///
    /// Q(s,a) ← (1-α)Q(s,a) + α[r + γ max_a' Q(s,a')]
    pub fn same_state_update(&mut self, state: Position, action: Action, reward: f64) {
        let current_q = self.get(state, action);
        let target = reward + self.discount_factor * self.max_q(state);
        let new_q = (1.0 - self.learning_rate) * current_q + self.learning_rate * target;
        self.set(state, action, round_to(new_q, Q_VALUE_DIGITS));
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// `next_state` is `None` when the transition ended the episode.
    pub fn q_learning_update(
        &mut self,
        state: Position,
        action: Action,
        reward: f64,
        next_state: Option<Position>,
    ) {
        let current_q = self.get(state, action);
        let max_next_q = next_state.map_or(0.0, |next| self.max_q(next));
        let td_target = reward + self.discount_factor * max_next_q;
        let td_error = td_target - current_q;
        let new_q = current_q + self.learning_rate * td_error;
        self.set(state, action, round_to(new_q, Q_VALUE_DIGITS));
    }

    /// Entries sorted by position, then action
    pub fn iter(&self) -> impl Iterator<Item = (Position, Action, f64)> + '_ {
        let mut entries: Vec<_> = self
            .q_values
            .iter()
            .map(|(&(p, a), &q)| (p, a, q))
            .collect();
        entries.sort_by_key(|(p, a, _)| (*p, *a));
        entries.into_iter()
    }

    /// Get total number of Q-values stored
    pub fn size(&self) -> usize {
        self.q_values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> (Grid, QTable) {
        let grid = Grid::classic();
        let table = QTable::new(&grid, 0.1, 0.4);
        (grid, table)
    }

    #[test]
    fn test_qtable_initialization() {
        let (grid, table) = table();
        assert_eq!(table.size(), 12 * 4);
        assert_eq!(table.get(grid.start(), Action::Up), 0.0);
        for action in Action::ALL {
            assert_eq!(table.get(grid.goal(), action), 1.0);
            assert_eq!(table.get(grid.hazard(), action), -1.0);
        }
    }

    #[test]
    fn test_qtable_set_get() {
        let (_, mut table) = table();
        let state = Position::new(0, 0);
        table.set(state, Action::Down, 1.5);
        assert_eq!(table.get(state, Action::Down), 1.5);
    }

    #[test]
    fn test_max_q() {
        let (_, mut table) = table();
        let state = Position::new(0, 0);
        table.set(state, Action::Up, 0.5);
        table.set(state, Action::Down, 1.5);
        table.set(state, Action::Left, 0.8);
        assert_eq!(table.max_q(state), 1.5);
    }

    #[test]
    fn test_greedy_action() {
        let (_, mut table) = table();
        let state = Position::new(0, 0);
        table.set(state, Action::Up, 0.5);
        table.set(state, Action::Down, 1.5);
        table.set(state, Action::Left, 0.8);
        assert_eq!(table.greedy_action(state), Action::Down);
    }

    #[test]
    fn test_greedy_ties_follow_enumeration_order() {
        let (_, mut table) = table();
        let state = Position::new(2, 2);
        assert_eq!(table.greedy_action(state), Action::Up);

        table.set(state, Action::Left, 0.3);
        table.set(state, Action::Right, 0.3);
        assert_eq!(table.greedy_action(state), Action::Left);
    }

    #[test]
    fn test_same_state_update() {
        let (_, mut table) = table();
        let state = Position::new(0, 2);
        table.set(state, Action::Up, 0.5);

        // (1 - 0.1) * 0 + 0.1 * (1 + 0.4 * 0.5) = 0.12
        table.same_state_update(state, Action::Right, 1.0);
        assert_eq!(table.get(state, Action::Right), 0.12);
    }

    #[test]
    fn test_q_learning_update() {
        let (_, mut table) = table();
        let state = Position::new(0, 1);
        let next_state = Position::new(0, 2);
        table.set(next_state, Action::Right, 0.5);

        // 0 + 0.1 * (0 + 0.4 * 0.5 - 0) = 0.02
        table.q_learning_update(state, Action::Right, 0.0, Some(next_state));
        assert_eq!(table.get(state, Action::Right), 0.02);

        // Terminal transition ignores the bootstrap: 0.1 * 1 = 0.1
        table.q_learning_update(next_state, Action::Up, 1.0, None);
        assert_eq!(table.get(next_state, Action::Up), 0.1);
    }
}
