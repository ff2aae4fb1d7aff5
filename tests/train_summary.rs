use clap::Parser;
use gridlearn::cli::commands::train::{TrainArgs, execute};
use tempfile::tempdir;

fn parse_args<I, T>(args: I) -> TrainArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    TrainArgs::parse_from(args)
}

#[test]
fn summary_without_extension_appends_json() {
    let tmp = tempdir().unwrap();
    let summary_stem = tmp.path().join("run_overview");

    let args = parse_args([
        "gridlearn-train",
        "--episodes",
        "5",
        "--seed",
        "1",
        "--summary",
        summary_stem.to_str().unwrap(),
    ]);

    execute(args).expect("training with summary should succeed");

    let expected_path = summary_stem.with_extension("json");
    assert!(
        expected_path.exists(),
        "expected summary at {}",
        expected_path.display()
    );

    let contents = std::fs::read_to_string(&expected_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["training"]["episodes"], 5);
    assert_eq!(parsed["agent"]["update_rule"], "policy_evaluation");
    assert_eq!(parsed["grid"]["rows"], 3);
}

#[test]
fn summary_directory_argument_creates_default_file() {
    let tmp = tempdir().unwrap();
    let summary_dir = tmp.path().join("summaries");
    let summary_arg = format!("{}/", summary_dir.display());

    let args = parse_args([
        "gridlearn-train",
        "--mode",
        "q-values",
        "--episodes",
        "3",
        "--seed",
        "2",
        "--summary",
        &summary_arg,
    ]);

    execute(args).expect("training with directory summary should succeed");

    let expected_path = summary_dir.join("training_summary.json");
    assert!(
        expected_path.exists(),
        "expected summary at {}",
        expected_path.display()
    );

    let contents = std::fs::read_to_string(&expected_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["training"]["episodes"], 3);
    assert_eq!(parsed["agent"]["update_rule"], "q_learning");
}

#[test]
fn csv_and_observations_are_written() {
    let tmp = tempdir().unwrap();
    let csv_path = tmp.path().join("q_values.csv");
    let observations = tmp.path().join("episodes.jsonl");

    let args = parse_args([
        "gridlearn-train",
        "--mode",
        "q-values",
        "--slippery",
        "--episodes",
        "4",
        "--seed",
        "9",
        "--format",
        "json",
        "--csv",
        csv_path.to_str().unwrap(),
        "--observations",
        observations.to_str().unwrap(),
    ]);

    execute(args).expect("training with exports should succeed");

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("row,col,action,value"));
    assert_eq!(lines.count(), 48);

    let jsonl = std::fs::read_to_string(&observations).unwrap();
    let episodes: Vec<serde_json::Value> = jsonl
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(episodes.len(), 4);
    for (index, episode) in episodes.iter().enumerate() {
        assert_eq!(episode["episode"], index);
        assert!(!episode["steps"].as_array().unwrap().is_empty());
    }
}

#[test]
fn config_file_is_loaded_and_flags_win() {
    let tmp = tempdir().unwrap();
    let config_path = tmp.path().join("experiment.json");
    std::fs::write(
        &config_path,
        r#"{ "agent": { "learning_rate": 0.5 }, "training": { "num_episodes": 50 } }"#,
    )
    .unwrap();
    let summary = tmp.path().join("summary.json");

    let args = parse_args([
        "gridlearn-train",
        "--config",
        config_path.to_str().unwrap(),
        "--episodes",
        "6",
        "--seed",
        "4",
        "--summary",
        summary.to_str().unwrap(),
    ]);

    execute(args).unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&summary).unwrap()).unwrap();
    assert_eq!(parsed["training"]["episodes"], 6);
    assert_eq!(parsed["agent"]["learning_rate"], 0.5);
}

#[test]
fn invalid_hyperparameter_is_reported() {
    let args = parse_args(["gridlearn-train", "--learning-rate", "0", "--episodes", "1"]);
    let err = execute(args).unwrap_err();
    assert!(format!("{err:#}").contains("learning_rate"));
}
