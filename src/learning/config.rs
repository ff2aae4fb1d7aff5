//! Hyperparameters for the learning agent.

use serde::{Deserialize, Serialize};

use crate::{
    environment::Dynamics,
    error::{Error, Result},
};

/// Which estimates the agent learns and how it backs them up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateRule {
    /// TD(0)-style policy evaluation over V(s)
    #[default]
    PolicyEvaluation,
    /// Q-learning over Q(s, a)
    QLearning,
}

/// Where the Q-learning target takes its bootstrap value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bootstrap {
    /// max_a' Q(s, a') of the recorded state itself
    #[default]
    SameState,
    /// max_a' Q(s', a') of the successor state, 0 after a terminal step
    Successor,
}

/// Configuration for creating an [`Agent`](super::Agent).
///
/// # Examples
///
/// ```
/// use gridlearn::learning::{AgentConfig, UpdateRule};
/// use gridlearn::environment::Dynamics;
///
/// let config = AgentConfig::new(UpdateRule::QLearning)
///     .with_learning_rate(0.2)
///     .with_dynamics(Dynamics::slippery())
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Value-update rule
    pub update_rule: UpdateRule,
    /// Learning rate α in (0, 1]
    pub learning_rate: f64,
    /// Discount factor γ in [0, 1], used by Q-learning only
    pub discount_factor: f64,
    /// Probability of acting greedily on the current estimates; otherwise
    /// the action is drawn uniformly
    pub epsilon: f64,
    /// Transition dynamics
    pub dynamics: Dynamics,
    /// Bootstrap source for Q-learning backups
    pub bootstrap: Bootstrap,
    /// Steps after which an episode is abandoned
    pub max_steps_per_episode: usize,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentConfig {
    /// Create a configuration for the given rule with default hyperparameters:
    /// α = 0.1, γ = 0.4, ε = 0.3, deterministic moves, 10 000 steps per episode.
    pub fn new(update_rule: UpdateRule) -> Self {
        Self {
            update_rule,
            learning_rate: 0.1,
            discount_factor: 0.4,
            epsilon: 0.3,
            dynamics: Dynamics::Deterministic,
            bootstrap: Bootstrap::default(),
            max_steps_per_episode: 10_000,
            seed: None,
        }
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_dynamics(mut self, dynamics: Dynamics) -> Self {
        self.dynamics = dynamics;
        self
    }

    pub fn with_bootstrap(mut self, bootstrap: Bootstrap) -> Self {
        self.bootstrap = bootstrap;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps_per_episode = max_steps;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every hyperparameter against its admissible range.
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(Error::invalid_parameter(
                "learning_rate",
                self.learning_rate,
                "must lie in (0, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return Err(Error::invalid_parameter(
                "discount_factor",
                self.discount_factor,
                "must lie in [0, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(Error::invalid_parameter(
                "epsilon",
                self.epsilon,
                "must lie in [0, 1]",
            ));
        }
        if self.max_steps_per_episode == 0 {
            return Err(Error::invalid_parameter(
                "max_steps_per_episode",
                self.max_steps_per_episode,
                "must be positive",
            ));
        }
        self.dynamics.validate()
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new(UpdateRule::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(AgentConfig::default().validate().is_ok());
        assert!(AgentConfig::new(UpdateRule::QLearning).validate().is_ok());
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let cases = [
            AgentConfig::default().with_learning_rate(0.0),
            AgentConfig::default().with_learning_rate(1.5),
            AgentConfig::default().with_discount_factor(-0.1),
            AgentConfig::default().with_epsilon(1.01),
            AgentConfig::default().with_max_steps(0),
            AgentConfig::default().with_dynamics(Dynamics::Slippery {
                intended_probability: -0.2,
            }),
        ];
        for config in cases {
            assert!(
                matches!(config.validate(), Err(Error::InvalidParameter { .. })),
                "expected rejection for {config:?}"
            );
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AgentConfig =
            serde_json::from_str(r#"{"update_rule": "q_learning", "epsilon": 0.5}"#).unwrap();
        assert_eq!(config.update_rule, UpdateRule::QLearning);
        assert_eq!(config.epsilon, 0.5);
        assert_eq!(config.learning_rate, 0.1);
        assert_eq!(config.dynamics, Dynamics::Deterministic);
    }

    #[test]
    fn test_slippery_dynamics_from_json() {
        let config: AgentConfig = serde_json::from_str(
            r#"{"dynamics": {"kind": "slippery", "intended_probability": 0.75}}"#,
        )
        .unwrap();
        assert_eq!(config.dynamics, Dynamics::slippery());
    }
}
