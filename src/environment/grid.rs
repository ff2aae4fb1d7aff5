//! Board description: dimensions, obstacles and the special cells

use std::collections::HashSet;

use crate::{
    error::{Error, Result},
    types::Position,
};

/// Immutable description of a grid world.
///
/// Construction validates the layout; every query afterwards is infallible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    start: Position,
    goal: Position,
    hazard: Position,
    obstacles: HashSet<Position>,
}

impl Grid {
    /// Create a grid, rejecting degenerate layouts.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyGrid`] if either dimension is zero
    /// - [`Error::OutOfBounds`] if start, goal, hazard or an obstacle lies outside the board
    /// - [`Error::GoalIsHazard`] if goal and hazard coincide
    /// - [`Error::BlockedCell`] if start, goal or hazard is an obstacle
    pub fn new(
        rows: usize,
        cols: usize,
        start: Position,
        goal: Position,
        hazard: Position,
        obstacles: impl IntoIterator<Item = Position>,
    ) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::EmptyGrid { rows, cols });
        }

        let grid = Self {
            rows,
            cols,
            start,
            goal,
            hazard,
            obstacles: obstacles.into_iter().collect(),
        };

        let named = [("start", start), ("goal", goal), ("hazard", hazard)];
        let obstacle_cells = grid.obstacles.iter().map(|&pos| ("obstacle", pos));
        for (what, position) in named.into_iter().chain(obstacle_cells) {
            if !grid.contains(position) {
                return Err(Error::OutOfBounds {
                    what: what.to_string(),
                    position,
                    rows,
                    cols,
                });
            }
        }

        if goal == hazard {
            return Err(Error::GoalIsHazard { position: goal });
        }

        for (what, position) in named {
            if grid.is_obstacle(position) {
                return Err(Error::BlockedCell {
                    what: what.to_string(),
                    position,
                });
            }
        }

        Ok(grid)
    }

    /// The 3x4 board: start bottom-left, goal top-right, hazard just below
    /// the goal and a single wall at (1, 1).
    pub fn classic() -> Self {
        Self {
            rows: 3,
            cols: 4,
            start: Position::new(2, 0),
            goal: Position::new(0, 3),
            hazard: Position::new(1, 3),
            obstacles: HashSet::from([Position::new(1, 1)]),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn goal(&self) -> Position {
        self.goal
    }

    pub fn hazard(&self) -> Position {
        self.hazard
    }

    pub fn obstacles(&self) -> &HashSet<Position> {
        &self.obstacles
    }

    /// Whether the position lies within `[0, rows) x [0, cols)`.
    pub fn contains(&self, position: Position) -> bool {
        position.row < self.rows && position.col < self.cols
    }

    pub fn is_obstacle(&self, position: Position) -> bool {
        self.obstacles.contains(&position)
    }

    /// Inside the board and not blocked.
    pub fn is_open(&self, position: Position) -> bool {
        self.contains(position) && !self.is_obstacle(position)
    }

    /// +1 at the goal, -1 at the hazard, 0 everywhere else.
    pub fn reward(&self, position: Position) -> f64 {
        if position == self.goal {
            1.0
        } else if position == self.hazard {
            -1.0
        } else {
            0.0
        }
    }

    pub fn is_terminal(&self, position: Position) -> bool {
        position == self.goal || position == self.hazard
    }

    /// Every cell in row-major order, obstacles included.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Position::new(row, col)))
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::classic()
    }
}
