//! Experiment configuration shared across commands

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    Result, environment::Grid, learning::AgentConfig, pipeline::TrainingConfig, types::Position,
};

/// Board layout as written in a configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    pub start: Position,
    pub goal: Position,
    pub hazard: Position,
    pub obstacles: Vec<Position>,
}

impl GridConfig {
    /// Validate the layout into a [`Grid`]
    pub fn build(&self) -> Result<Grid> {
        Grid::new(
            self.rows,
            self.cols,
            self.start,
            self.goal,
            self.hazard,
            self.obstacles.iter().copied(),
        )
    }
}

impl Default for GridConfig {
    /// The classic 3x4 board
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 4,
            start: Position::new(2, 0),
            goal: Position::new(0, 3),
            hazard: Position::new(1, 3),
            obstacles: vec![Position::new(1, 1)],
        }
    }
}

/// Everything needed to run one experiment
///
/// Every section is optional in the file; missing fields fall back to their
/// defaults.
///
/// ```
/// use gridlearn::cli::config::ExperimentConfig;
/// use gridlearn::learning::UpdateRule;
///
/// let config: ExperimentConfig = serde_json::from_str(
///     r#"{ "agent": { "update_rule": "q_learning" }, "training": { "num_episodes": 200 } }"#,
/// )
/// .unwrap();
/// assert_eq!(config.agent.update_rule, UpdateRule::QLearning);
/// assert_eq!(config.training.num_episodes, 200);
/// assert_eq!(config.grid.rows, 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub grid: GridConfig,
    pub agent: AgentConfig,
    pub training: TrainingConfig,
}

impl ExperimentConfig {
    /// Load a configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let config = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(config)
    }

    /// Check every section without building anything
    pub fn validate(&self) -> Result<()> {
        self.grid.build()?;
        self.agent.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_default_grid_is_classic() {
        assert_eq!(GridConfig::default().build().unwrap(), Grid::classic());
    }

    #[test]
    fn test_invalid_grid_is_rejected() {
        let config = GridConfig {
            hazard: Position::new(0, 3),
            ..GridConfig::default()
        };
        assert!(matches!(config.build(), Err(Error::GoalIsHazard { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("experiment.json");
        std::fs::write(
            &path,
            r#"{
                "grid": {
                    "rows": 2, "cols": 3,
                    "start": { "row": 1, "col": 0 },
                    "goal": { "row": 0, "col": 2 },
                    "hazard": { "row": 1, "col": 2 },
                    "obstacles": []
                },
                "agent": { "epsilon": 0.5, "dynamics": { "kind": "slippery", "intended_probability": 0.8 } }
            }"#,
        )
        .unwrap();

        let config = ExperimentConfig::load(&path).unwrap();
        assert!(config.validate().is_ok());
        let grid = config.grid.build().unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(config.agent.epsilon, 0.5);
        assert_eq!(config.agent.learning_rate, 0.1);
        assert_eq!(config.training.num_episodes, 5000);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ExperimentConfig::load("/nonexistent/experiment.json").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
