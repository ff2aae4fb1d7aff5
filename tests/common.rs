#![allow(dead_code)]

use gridlearn::{Grid, Position};
use rand::{SeedableRng, rngs::StdRng};

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// 3x3 board with the goal in a corner and an obstacle in the middle
pub fn small_grid() -> Grid {
    Grid::new(
        3,
        3,
        Position::new(2, 0),
        Position::new(0, 2),
        Position::new(2, 2),
        [Position::new(1, 1)],
    )
    .expect("valid grid")
}
