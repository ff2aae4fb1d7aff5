//! Tabular value learning on a grid world
//!
//! The agent learns one of two tables through repeated episodes that each
//! end on the goal or the hazard cell.
//!
//! ## Update rules
//!
//! - **Policy evaluation**: every state entered during the episode moves
//!   toward the terminal reward, `V(s) ← V(s) + α[R - V(s)]`, rounded to
//!   three decimals.
//! - **Q-learning**: every recorded (state, action) pair is updated
//!   backwards, `Q(s,a) ← (1-α)Q(s,a) + α[R + γ max_a' Q(·,a')]`, rounded
//!   to two decimals. [`Bootstrap`] picks which state the max is taken over.
//!
//! | Aspect | Policy evaluation | Q-learning |
//! |--------|-------------------|------------|
//! | Table | V(s) | Q(s, a) |
//! | Greedy choice | best V of the looked-ahead cell | best Q in the current cell |
//! | Discount | unused | γ |
//!
//! ## Usage Example
//!
//! ```no_run
//! use gridlearn::environment::{Dynamics, Grid};
//! use gridlearn::learning::{Agent, AgentConfig, UpdateRule};
//!
//! let config = AgentConfig::new(UpdateRule::QLearning)
//!     .with_dynamics(Dynamics::slippery())
//!     .with_seed(42);
//! let mut agent = Agent::new(Grid::classic(), config)?;
//! agent.train(5000)?;
//! let q_values = agent.snapshot();
//! # Ok::<(), gridlearn::Error>(())
//! ```

pub mod agent;
pub mod config;
pub mod estimates;
pub mod q_table;
pub mod trajectory;
pub mod value_table;

pub use agent::{Agent, EpisodeOutcome, EpisodeReport};
pub use config::{AgentConfig, Bootstrap, UpdateRule};
pub use estimates::{ValueEstimates, ValueRecord};
pub use q_table::QTable;
pub use trajectory::{Trajectory, Transition};
pub use value_table::StateValueTable;
