//! Scripted trips through the episode controller and the run pipeline.

mod common;

use common::{ScriptedSimulation, ScriptedTick};
use smartcab::{
    Action, Error, Light, State, Urgency, Waypoint,
    pipeline::{EpisodeController, RandomPolicy, RunConfig, TickRecord, TrainingPipeline, TripPhase},
    ports::{Simulation, TripStatus},
    q_learning::{EpsilonSchedule, QLearningPolicy},
};

const ALPHA: f64 = 0.5;
const GAMMA: f64 = 0.2;
const Q_INIT: f64 = 9.0;

fn learner(seed: u64) -> Box<QLearningPolicy> {
    Box::new(
        QLearningPolicy::new(ALPHA, GAMMA, Q_INIT, EpsilonSchedule::constant(0.0))
            .with_seed(seed),
    )
}

fn five_tick_trip() -> Vec<ScriptedTick> {
    vec![
        ScriptedTick::new(Light::Green, 45, Waypoint::Forward, 2.0),
        ScriptedTick::new(Light::Red, 30, Waypoint::Forward, -1.0),
        ScriptedTick::new(Light::Green, 20, Waypoint::Left, -0.5),
        ScriptedTick::new(Light::Red, 10, Waypoint::Right, 0.0),
        ScriptedTick::new(Light::Green, 5, Waypoint::Forward, 12.0).finishing(),
    ]
}

fn drive(
    controller: &mut EpisodeController,
    sim: &mut ScriptedSimulation,
) -> Vec<TickRecord> {
    let mut planner = sim.planner();
    let destination = sim.start_trip().unwrap();
    controller.reset(&mut planner, destination);

    let mut records = Vec::new();
    loop {
        let record = controller.update(sim, &planner).unwrap();
        let done = record.done;
        records.push(record);
        if done || sim.advance() == TripStatus::TimedOut {
            break;
        }
    }
    records
}

#[test]
fn five_tick_trip_learns_every_transition_but_the_last() {
    let mut controller = EpisodeController::new(learner(17));
    let mut sim = ScriptedSimulation::new(vec![five_tick_trip()]);

    let records = drive(&mut controller, &mut sim);

    let learned: Vec<bool> = records.iter().map(|r| r.learned).collect();
    assert_eq!(learned, [false, true, true, true, true]);
    assert_eq!(controller.phase(), TripPhase::Success);

    let expected_states = [
        State::new(Light::Green, Waypoint::Forward, Urgency::Patient),
        State::new(Light::Red, Waypoint::Forward, Urgency::Normal),
        State::new(Light::Green, Waypoint::Left, Urgency::Normal),
        State::new(Light::Red, Waypoint::Right, Urgency::Urgent),
        State::new(Light::Green, Waypoint::Forward, Urgency::Urgent),
    ];
    let states: Vec<State> = records.iter().map(|r| r.state).collect();
    assert_eq!(states, expected_states);

    let policy = controller
        .policy()
        .as_any()
        .downcast_ref::<QLearningPolicy>()
        .unwrap();
    let table = policy.table();
    assert_eq!(table.size(), 4);

    // Every successor is unseen when its predecessor is learned, so the
    // bootstrap term is always the default value.
    for record in &records[..4] {
        let expected = Q_INIT + ALPHA * (record.reward + GAMMA * Q_INIT - Q_INIT);
        let stored = table.get(&record.state, record.action);
        assert!(
            (stored - expected).abs() < 1e-12,
            "tick {}: stored {stored}, expected {expected}",
            record.tick
        );
    }
    assert!(!table.contains(&records[4].state, records[4].action));

    let summary = controller.summary();
    assert_eq!(summary.successes, 1);
    assert_eq!(summary.average_remaining_time, Some(5.0));
    assert_eq!(summary.positive_reward, 14.0);
    assert_eq!(summary.negative_reward, -1.5);
    assert_eq!(summary.table_entries, Some(4));
}

#[test]
fn repeated_state_bootstraps_from_updated_value() {
    let tick = ScriptedTick::new(Light::Red, 30, Waypoint::Left, 0.0);
    let mut controller = EpisodeController::new(Box::new(
        QLearningPolicy::new(ALPHA, GAMMA, Q_INIT, EpsilonSchedule::constant(0.0))
            .with_seed(3),
    ));
    let mut sim = ScriptedSimulation::new(vec![vec![tick, tick, tick]]);
    let records = drive(&mut controller, &mut sim);
    assert_eq!(records.len(), 3);
    assert_eq!(controller.phase(), TripPhase::Active);

    let policy = controller
        .policy()
        .as_any()
        .downcast_ref::<QLearningPolicy>()
        .unwrap();
    let table = policy.table();
    let state = records[0].state;

    // Greedy selection moves off the lowered action, so the two learned
    // transitions land on different actions of the same state. Two actions
    // are still at the default when the second one is learned.
    assert_ne!(records[0].action, records[1].action);
    assert_eq!(table.size(), 2);
    let expected = Q_INIT + ALPHA * (GAMMA * Q_INIT - Q_INIT);
    for record in &records[..2] {
        assert!((table.get(&state, record.action) - expected).abs() < 1e-12);
    }
    let untouched = Action::ALL
        .iter()
        .filter(|action| table.get(&state, **action) == Q_INIT)
        .count();
    assert_eq!(untouched, 2);
}

#[test]
fn update_before_reset_is_rejected() {
    let mut controller = EpisodeController::new(learner(1));
    let mut sim = ScriptedSimulation::new(vec![five_tick_trip()]);
    let planner = sim.planner();
    sim.start_trip().unwrap();

    let err = controller.update(&mut sim, &planner).unwrap_err();
    assert!(matches!(err, Error::TripNotStarted));
    assert!(sim.actions.is_empty());
}

#[test]
fn pending_transition_does_not_cross_trips() {
    let mut controller = EpisodeController::new(learner(9));
    let mut sim = ScriptedSimulation::new(vec![five_tick_trip(), five_tick_trip()]);

    drive(&mut controller, &mut sim);
    assert!(controller.pending().is_some());

    let second = drive(&mut controller, &mut sim);
    assert!(!second[0].learned);
    assert_eq!(controller.statistics().trips(), 2);
}

/// One-tick trips that finish with `remaining` left, interleaved with
/// two-tick trips that time out.
fn mixed_run(remaining: &[i64], pattern: &str) -> Vec<Vec<ScriptedTick>> {
    let mut successes = remaining.iter();
    let failing_starts = [
        (Light::Green, 45),
        (Light::Green, 30),
        (Light::Green, 10),
        (Light::Red, 45),
    ];
    let mut failures = failing_starts.iter().cycle();

    pattern
        .chars()
        .map(|c| match c {
            'S' => {
                let deadline = *successes.next().unwrap();
                vec![ScriptedTick::new(Light::Green, deadline, Waypoint::Forward, 12.0).finishing()]
            }
            _ => {
                let (light, deadline) = *failures.next().unwrap();
                vec![
                    ScriptedTick::new(light, deadline, Waypoint::Left, -1.0),
                    ScriptedTick::new(light, deadline - 1, Waypoint::Left, -1.0),
                ]
            }
        })
        .collect()
}

#[test]
fn run_statistics_over_mixed_trips() {
    let trips = mixed_run(&[5, 10, 15, 3, 7, 9], "SFSSFSFSFS");
    let mut sim = ScriptedSimulation::new(trips);
    let mut planner = sim.planner();
    let mut controller =
        EpisodeController::new(Box::new(RandomPolicy::with_seed("Random".to_string(), 2)));

    let mut pipeline = TrainingPipeline::new(RunConfig {
        trials: 10,
        seed: None,
        update_delay_ms: 0,
    });
    let summary = pipeline
        .run(&mut sim, &mut planner, &mut controller)
        .unwrap();

    assert_eq!(summary.trips, 10);
    assert_eq!(summary.successes, 6);
    assert!((summary.success_percentage - 60.0).abs() < 1e-12);
    let average = summary.average_remaining_time.unwrap();
    assert!((average - 49.0 / 6.0).abs() < 1e-12);
    assert_eq!(summary.positive_reward, 72.0);
    assert_eq!(summary.negative_reward, -8.0);
    assert_eq!(summary.net_reward, 64.0);
    assert_eq!(summary.table_entries, None);
    assert_eq!(planner.routed, 10);

    let dist = summary.remaining_time.unwrap();
    assert_eq!(dist.min, 3.0);
    assert_eq!(dist.max, 15.0);
}

#[test]
fn only_mid_trip_transitions_reach_the_table() {
    let trips = mixed_run(&[5, 10, 15, 3, 7, 9], "SFSSFSFSFS");
    let mut sim = ScriptedSimulation::new(trips);
    let mut planner = sim.planner();
    let mut controller = EpisodeController::new(learner(4));

    let mut pipeline = TrainingPipeline::new(RunConfig {
        trials: 10,
        seed: Some(4),
        update_delay_ms: 0,
    });
    let summary = pipeline
        .run(&mut sim, &mut planner, &mut controller)
        .unwrap();

    // Each of the four failing trips learns its first tick once; the
    // one-tick successes never learn.
    assert_eq!(summary.table_entries, Some(4));
}

#[test]
fn zero_successes_report_no_average() {
    let trips = mixed_run(&[], "FFF");
    let mut sim = ScriptedSimulation::new(trips);
    let mut planner = sim.planner();
    let mut controller =
        EpisodeController::new(Box::new(RandomPolicy::with_seed("Random".to_string(), 5)));

    let mut pipeline = TrainingPipeline::new(RunConfig {
        trials: 3,
        seed: None,
        update_delay_ms: 0,
    });
    let summary = pipeline
        .run(&mut sim, &mut planner, &mut controller)
        .unwrap();

    assert_eq!(summary.successes, 0);
    assert_eq!(summary.success_percentage, 0.0);
    assert_eq!(summary.average_remaining_time, None);
    assert!(summary.remaining_time.is_none());
    assert!(summary.to_string().contains("no successful trips"));
}

#[test]
fn percept_without_light_stops_the_run_with_table_intact() {
    let prefix = vec![
        ScriptedTick::new(Light::Red, 40, Waypoint::Right, -1.0),
        ScriptedTick::new(Light::Green, 39, Waypoint::Right, 2.0),
    ];
    let mut failing = prefix.clone();
    failing.push(ScriptedTick::new(Light::Green, 38, Waypoint::Forward, 2.0).without_light());

    let config = RunConfig {
        trials: 2,
        seed: Some(12),
        update_delay_ms: 0,
    };
    let run = |second_trip: Vec<ScriptedTick>| {
        let mut sim = ScriptedSimulation::new(vec![five_tick_trip(), second_trip]);
        let mut planner = sim.planner();
        let mut controller = EpisodeController::new(learner(12));
        let result = TrainingPipeline::new(config.clone()).run(&mut sim, &mut planner, &mut controller);
        let table = controller
            .policy()
            .as_any()
            .downcast_ref::<QLearningPolicy>()
            .unwrap()
            .table()
            .clone();
        (result, table, controller.statistics().clone(), sim.actions.len())
    };

    // Same trips, but the second one times out right before the blind tick
    let (completed, expected_table, _, _) = run(prefix);
    assert!(completed.is_ok());

    let (result, table, stats, acts) = run(failing);
    assert!(matches!(
        result,
        Err(Error::MissingPerceptField { field: "light" })
    ));
    assert_eq!(table.size(), expected_table.size());
    assert_eq!(table, expected_table);

    // The blind tick never reached the simulation or the statistics
    assert_eq!(acts, 7);
    assert_eq!(stats.trips(), 2);
    assert_eq!(stats.successes(), 1);
    assert_eq!(stats.negative_reward(), -2.5);
    assert_eq!(stats.positive_reward(), 16.0);
}
