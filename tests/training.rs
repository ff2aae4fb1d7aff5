mod common;

use gridlearn::{
    Action, Agent, AgentConfig, Bootstrap, Dynamics, Grid, Position, TrainingConfig,
    TrainingPipeline, UpdateRule,
    pipeline::{MetricsObserver, SharedObserver},
};

fn assert_anchored(agent: &Agent) {
    let grid = agent.grid();
    let snapshot = agent.snapshot();
    match agent.config().update_rule {
        UpdateRule::PolicyEvaluation => {
            let table = snapshot.state_values().unwrap();
            assert_eq!(table.get(grid.goal()), 1.0);
            assert_eq!(table.get(grid.hazard()), -1.0);
        }
        UpdateRule::QLearning => {
            let table = snapshot.action_values().unwrap();
            for action in Action::ALL {
                assert_eq!(table.get(grid.goal(), action), 1.0);
                assert_eq!(table.get(grid.hazard(), action), -1.0);
            }
        }
    }
}

#[test]
fn policy_evaluation_completes_requested_episodes() {
    let config = AgentConfig::new(UpdateRule::PolicyEvaluation).with_seed(42);
    let mut agent = Agent::new(Grid::classic(), config).unwrap();

    let result = agent.train(5000).unwrap();

    assert_eq!(result.episodes, 5000);
    assert_eq!(result.goals + result.hazards, 5000);
    assert_eq!(agent.completed_episodes(), 5000);
    assert_eq!(agent.position(), Position::new(2, 0));
    assert!(agent.trajectory().is_empty());
    assert_anchored(&agent);

    let snapshot = agent.snapshot();
    let table = snapshot.state_values().unwrap();
    // The wall is never entered, so it keeps its initial value
    assert_eq!(table.get(Position::new(1, 1)), 0.0);
    for (_, value) in table.iter() {
        assert!((-1.0..=1.0).contains(&value));
    }
}

#[test]
fn q_learning_completes_requested_episodes() {
    let config = AgentConfig::new(UpdateRule::QLearning)
        .with_dynamics(Dynamics::slippery())
        .with_seed(7);
    let mut agent = Agent::new(Grid::classic(), config).unwrap();

    let result = agent.train(5000).unwrap();

    assert_eq!(result.episodes, 5000);
    assert_eq!(agent.completed_episodes(), 5000);
    assert_anchored(&agent);
    assert_eq!(agent.snapshot().action_values().unwrap().size(), 48);
}

#[test]
fn successor_bootstrap_trains_and_stays_anchored() {
    let config = AgentConfig::new(UpdateRule::QLearning)
        .with_bootstrap(Bootstrap::Successor)
        .with_epsilon(0.8)
        .with_seed(3);
    let mut agent = Agent::new(common::small_grid(), config).unwrap();

    let result = agent.train(500).unwrap();
    assert_eq!(result.episodes, 500);
    assert_anchored(&agent);
}

#[test]
fn zero_episodes_leaves_table_untouched() {
    let config = AgentConfig::new(UpdateRule::PolicyEvaluation).with_seed(1);
    let mut agent = Agent::new(Grid::classic(), config).unwrap();
    let before = agent.snapshot();

    let result = agent.train(0).unwrap();

    assert_eq!(result.episodes, 0);
    assert_eq!(agent.snapshot(), before);
}

#[test]
fn unit_learning_rate_copies_terminal_reward() {
    // One-row board: hazard, start, goal
    let grid = Grid::new(
        1,
        3,
        Position::new(0, 1),
        Position::new(0, 2),
        Position::new(0, 0),
        [],
    )
    .unwrap();
    let start = grid.start();
    let config = AgentConfig::new(UpdateRule::PolicyEvaluation)
        .with_learning_rate(1.0)
        .with_seed(5);
    let mut agent = Agent::new(grid, config).unwrap();

    let mut re_entered_start = false;
    let report = agent
        .run_episode(|_, transition| {
            re_entered_start |= transition.to == start;
            Ok(())
        })
        .unwrap();

    let snapshot = agent.snapshot();
    let table = snapshot.state_values().unwrap();
    let expected = if re_entered_start { report.reward } else { 0.0 };
    assert_eq!(table.get(start), expected);
    assert_eq!(table.get(Position::new(0, 2)), 1.0);
    assert_eq!(table.get(Position::new(0, 0)), -1.0);
}

#[test]
fn runs_are_reproducible_with_a_seed() {
    let run = || {
        let config = AgentConfig::new(UpdateRule::QLearning).with_seed(99);
        let mut agent = Agent::new(Grid::classic(), config).unwrap();
        let result = agent.train(200).unwrap();
        (result, agent.snapshot())
    };

    let (first_result, first_table) = run();
    let (second_result, second_table) = run();
    assert_eq!(first_result, second_result);
    assert_eq!(first_table, second_table);
}

#[test]
fn metrics_observer_sees_every_completed_episode() {
    let config = AgentConfig::new(UpdateRule::PolicyEvaluation).with_seed(8);
    let mut agent = Agent::new(Grid::classic(), config).unwrap();

    let (metrics, handle) = SharedObserver::new(MetricsObserver::new());
    let result = TrainingPipeline::new(TrainingConfig::new(100))
        .with_observer(Box::new(metrics))
        .run(&mut agent)
        .unwrap();

    let metrics = handle.borrow();
    assert_eq!(metrics.completed(), 100);
    assert_eq!(metrics.goals(), result.goals);
    assert_eq!(metrics.hazards(), result.hazards);
    assert_eq!(
        metrics.episode_lengths().iter().sum::<usize>(),
        result.total_steps
    );
}
