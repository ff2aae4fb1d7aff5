//! Train command - Run an agent on a grid world and report what it learned

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use serde_json::to_writer_pretty;
use tracing::debug;

use crate::{
    cli::{
        config::{ExperimentConfig, GridConfig},
        output::{print_kv, print_section, print_subsection, print_training_result},
    },
    environment::{DEFAULT_INTENDED_PROBABILITY, Dynamics},
    learning::{Agent, AgentConfig, Bootstrap, UpdateRule, ValueRecord},
    pipeline::{
        JsonlObserver, MetricsObserver, ProgressObserver, SharedObserver, TrainingPipeline,
        TrainingResult,
    },
    report,
};

/// Which table the agent learns
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// State values V(s) by policy evaluation
    Values,
    /// Action values Q(s, a) by Q-learning
    QValues,
}

impl From<Mode> for UpdateRule {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Values => UpdateRule::PolicyEvaluation,
            Mode::QValues => UpdateRule::QLearning,
        }
    }
}

/// Bootstrap source for Q-learning backups
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BootstrapArg {
    SameState,
    Successor,
}

impl From<BootstrapArg> for Bootstrap {
    fn from(arg: BootstrapArg) -> Self {
        match arg {
            BootstrapArg::SameState => Bootstrap::SameState,
            BootstrapArg::Successor => Bootstrap::Successor,
        }
    }
}

/// How the learned table is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct TrainingSummaryFile<'a> {
    training: &'a TrainingResult,
    agent: &'a AgentConfig,
    grid: &'a GridConfig,
    recent_mean_steps: Option<f64>,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    training: &'a TrainingResult,
    values: Vec<ValueRecord>,
}

const RECENT_WINDOW: usize = 100;

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Train an agent on a grid world")]
pub struct TrainArgs {
    /// Learn state values or action values
    #[arg(long, value_enum)]
    pub mode: Option<Mode>,

    /// Number of episodes that must reach a terminal cell
    #[arg(long, short = 'e')]
    pub episodes: Option<usize>,

    /// Learning rate α in (0, 1]
    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// Discount factor γ in [0, 1] (Q-learning only)
    #[arg(long)]
    pub discount: Option<f64>,

    /// Probability of acting greedily
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Use slippery moves
    #[arg(long)]
    pub slippery: bool,

    /// Probability that a slippery move goes where intended (implies --slippery)
    #[arg(long)]
    pub slip_probability: Option<f64>,

    /// Bootstrap source for Q-learning
    #[arg(long, value_enum)]
    pub bootstrap: Option<BootstrapArg>,

    /// Steps after which an episode is abandoned and retried
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON experiment file; flags override its values
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Output format for the learned table
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also print the greedy policy
    #[arg(long)]
    pub policy: bool,

    /// Optional path for writing the learned table as CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Optional file for JSONL observations
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

impl TrainArgs {
    /// Load the experiment file (or defaults) and apply the flags on top.
    pub fn resolve(&self) -> Result<ExperimentConfig> {
        let mut config = match &self.config {
            Some(path) => ExperimentConfig::load(path)
                .with_context(|| format!("loading experiment config {}", path.display()))?,
            None => ExperimentConfig::default(),
        };

        let agent = &mut config.agent;
        if let Some(mode) = self.mode {
            agent.update_rule = mode.into();
        }
        if let Some(learning_rate) = self.learning_rate {
            agent.learning_rate = learning_rate;
        }
        if let Some(discount) = self.discount {
            agent.discount_factor = discount;
        }
        if let Some(epsilon) = self.epsilon {
            agent.epsilon = epsilon;
        }
        match (self.slippery, self.slip_probability) {
            (_, Some(p)) => {
                agent.dynamics = Dynamics::Slippery {
                    intended_probability: p,
                }
            }
            (true, None) => {
                agent.dynamics = Dynamics::Slippery {
                    intended_probability: DEFAULT_INTENDED_PROBABILITY,
                }
            }
            (false, None) => {}
        }
        if let Some(bootstrap) = self.bootstrap {
            agent.bootstrap = bootstrap.into();
        }
        if let Some(max_steps) = self.max_steps {
            agent.max_steps_per_episode = max_steps;
        }
        if let Some(seed) = self.seed {
            agent.seed = Some(seed);
        }
        if let Some(episodes) = self.episodes {
            config.training.num_episodes = episodes;
        }

        Ok(config)
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = args.resolve()?;
    config.validate().context("invalid experiment configuration")?;
    debug!(?config, "resolved experiment");

    let summary_spec = args.summary.as_ref().map(|raw| {
        let sanitized = sanitize_summary_path(raw);
        let normalized = sanitized != *raw;
        (sanitized, normalized)
    });

    let grid = config.grid.build()?;
    let mut agent = Agent::new(grid.clone(), config.agent.clone())?;

    let (metrics, metrics_handle) = SharedObserver::new(MetricsObserver::new());
    let mut pipeline =
        TrainingPipeline::new(config.training.clone()).with_observer(Box::new(metrics));
    if args.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.observations {
        let observer = JsonlObserver::new(path)
            .with_context(|| format!("creating observation file {}", path.display()))?;
        pipeline = pipeline.with_observer(Box::new(observer));
    }

    let result = pipeline.run(&mut agent).context("training failed")?;
    let recent_mean_steps = metrics_handle.borrow().recent_mean_length(RECENT_WINDOW);
    let estimates = agent.snapshot();

    match args.format {
        OutputFormat::Text => {
            print_section(&format!(
                "Training: {} on {}x{} grid",
                match config.agent.update_rule {
                    UpdateRule::PolicyEvaluation => "state values",
                    UpdateRule::QLearning => "action values",
                },
                grid.rows(),
                grid.cols()
            ));
            print_training_result(&result);
            if let Some(mean) = recent_mean_steps {
                print_kv(
                    &format!("Mean steps (last {RECENT_WINDOW})"),
                    &format!("{mean:.2}"),
                );
            }

            print_subsection("Learned values");
            print!("{}", report::render(&grid, &estimates));

            if args.policy {
                print_subsection("Greedy policy");
                print!("{}", report::render_policy(&grid, &estimates));
            }
        }
        OutputFormat::Json => {
            let json = JsonReport {
                training: &result,
                values: estimates.records(),
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    if let Some(path) = &args.csv {
        report::write_csv(path, &estimates)
            .with_context(|| format!("writing CSV to {}", path.display()))?;
        if args.format == OutputFormat::Text {
            println!("\nValues written to {}", path.display());
        }
    }

    if let Some((summary_path, normalized)) = summary_spec {
        if normalized {
            eprintln!("Normalizing summary path to {}", summary_path.display());
        }

        if let Some(parent) = summary_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let summary = TrainingSummaryFile {
            training: &result,
            agent: &config.agent,
            grid: &config.grid,
            recent_mean_steps,
        };

        let file = File::create(&summary_path)
            .with_context(|| format!("creating summary {}", summary_path.display()))?;
        to_writer_pretty(file, &summary)?;
        if args.format == OutputFormat::Text {
            println!("\nSummary written to {}", summary_path.display());
        }
    }

    Ok(())
}
