//! The value store an agent learns into, in either of its two shapes.

use serde::Serialize;

use super::{config::UpdateRule, q_table::QTable, value_table::StateValueTable};
use crate::{
    environment::Grid,
    types::{Action, Position},
};

/// State values or action values, depending on the update rule.
///
/// Returned by [`Agent::snapshot`](super::Agent::snapshot) for reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueEstimates {
    StateValues(StateValueTable),
    ActionValues(QTable),
}

/// One flattened table entry, for JSON and CSV output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueRecord {
    pub row: usize,
    pub col: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
    pub value: f64,
}

impl ValueEstimates {
    pub fn new(
        grid: &Grid,
        update_rule: UpdateRule,
        learning_rate: f64,
        discount_factor: f64,
    ) -> Self {
        match update_rule {
            UpdateRule::PolicyEvaluation => {
                ValueEstimates::StateValues(StateValueTable::new(grid, learning_rate))
            }
            UpdateRule::QLearning => {
                ValueEstimates::ActionValues(QTable::new(grid, learning_rate, discount_factor))
            }
        }
    }

    pub fn anchor_terminal(&mut self, grid: &Grid) {
        match self {
            ValueEstimates::StateValues(table) => table.anchor_terminal(grid),
            ValueEstimates::ActionValues(table) => table.anchor_terminal(grid),
        }
    }

    pub fn state_values(&self) -> Option<&StateValueTable> {
        match self {
            ValueEstimates::StateValues(table) => Some(table),
            ValueEstimates::ActionValues(_) => None,
        }
    }

    pub fn action_values(&self) -> Option<&QTable> {
        match self {
            ValueEstimates::StateValues(_) => None,
            ValueEstimates::ActionValues(table) => Some(table),
        }
    }

    /// Entries ordered by position (and action for Q-values).
    pub fn records(&self) -> Vec<ValueRecord> {
        match self {
            ValueEstimates::StateValues(table) => table
                .iter()
                .map(|(Position { row, col }, value)| ValueRecord {
                    row,
                    col,
                    action: None,
                    value,
                })
                .collect(),
            ValueEstimates::ActionValues(table) => table
                .iter()
                .map(|(Position { row, col }, action, value)| ValueRecord {
                    row,
                    col,
                    action: Some(action),
                    value,
                })
                .collect(),
        }
    }
}
