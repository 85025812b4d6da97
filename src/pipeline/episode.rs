//! Episode controller: the per-tick sense, decide, act, learn loop

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Error, Result,
    analysis::{RunStatistics, RunSummary},
    ports::{Cell, Policy, RoutePlanner, Simulation, Transition},
    state::{Percept, abstract_state},
    types::{Action, State},
};

/// Where the current trip stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripPhase {
    Idle,
    Active,
    Success,
    TimedOut,
}

/// How a trip ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TripOutcome {
    Reached { remaining: i64, ticks: usize },
    TimedOut { ticks: usize },
}

impl TripOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TripOutcome::Reached { .. })
    }

    pub fn ticks(&self) -> usize {
        match self {
            TripOutcome::Reached { ticks, .. } | TripOutcome::TimedOut { ticks } => *ticks,
        }
    }
}

/// Diagnostic record of a single tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickRecord {
    /// Trip number (0-based)
    pub trip: usize,
    /// Tick number within the trip (0-based)
    pub tick: usize,
    pub state: State,
    /// Remaining deadline sensed before acting
    pub deadline: i64,
    pub percept: Percept,
    pub action: Action,
    pub reward: f64,
    /// Whether the previous transition was learned this tick
    pub learned: bool,
    /// Whether the destination was reached this tick
    pub done: bool,
}

/// Drives one agent through trips
///
/// Owns the policy, the single pending transition and the run statistics.
/// The transition from tick `t` is learned on tick `t + 1`, once the state it
/// led to is known; the first tick of every trip therefore learns nothing.
pub struct EpisodeController {
    policy: Box<dyn Policy>,
    pending: Option<Transition>,
    stats: RunStatistics,
    phase: TripPhase,
    trip: usize,
    tick: usize,
}

impl EpisodeController {
    pub fn new(policy: Box<dyn Policy>) -> Self {
        Self {
            policy,
            pending: None,
            stats: RunStatistics::new(),
            phase: TripPhase::Idle,
            trip: 0,
            tick: 0,
        }
    }

    /// Start a new trip toward `destination`
    ///
    /// Clears the pending transition, routes the planner and moves the
    /// policy to the exploration rate scheduled for this trip.
    pub fn reset(&mut self, planner: &mut dyn RoutePlanner, destination: Cell) {
        self.trip = self.stats.trips();
        self.stats.record_trip_start();
        planner.route_to(destination);
        self.pending = None;
        self.tick = 0;
        self.phase = TripPhase::Active;
        self.policy.begin_trip(self.trip);
        debug!(
            trip = self.trip,
            %destination,
            epsilon = ?self.policy.epsilon(),
            "trip started"
        );
    }

    /// Run one tick: sense, abstract, choose, act, learn, record
    ///
    /// # Errors
    ///
    /// Returns [`Error::TripNotStarted`] if no trip is active, and propagates
    /// simulation, percept and learning errors. A failed tick leaves the value
    /// table, the statistics and the pending transition as they were after the
    /// previous tick.
    pub fn update(
        &mut self,
        sim: &mut dyn Simulation,
        planner: &dyn RoutePlanner,
    ) -> Result<TickRecord> {
        if self.phase != TripPhase::Active {
            return Err(Error::TripNotStarted);
        }

        let waypoint = planner.next_waypoint(sim.pose());
        let percept = sim.sense()?;
        let deadline = sim.deadline();
        let state = abstract_state(&percept, deadline, waypoint)?;

        let action = self.policy.choose_action(&state);
        let reward = sim.act(action)?;

        // Nothing below may change if the update is rejected
        let learned = match &self.pending {
            Some(previous) => {
                self.policy.learn(previous, &state)?;
                true
            }
            None => false,
        };
        self.pending = Some(Transition {
            state,
            action,
            reward,
        });
        self.stats.record_reward(reward);

        let done = sim.done();
        if done {
            self.stats.record_success(sim.deadline());
            self.phase = TripPhase::Success;
        }

        let record = TickRecord {
            trip: self.trip,
            tick: self.tick,
            state,
            deadline,
            percept,
            action,
            reward,
            learned,
            done,
        };
        self.tick += 1;

        debug!(
            trip = record.trip,
            tick = record.tick,
            state = %record.state,
            deadline = record.deadline,
            light = ?record.percept.light,
            action = %record.action,
            reward = record.reward,
            "tick"
        );
        Ok(record)
    }

    /// Mark the active trip as out of time
    pub fn mark_timed_out(&mut self) {
        if self.phase == TripPhase::Active {
            self.phase = TripPhase::TimedOut;
        }
    }

    pub fn phase(&self) -> TripPhase {
        self.phase
    }

    /// Ticks taken in the current trip
    pub fn ticks(&self) -> usize {
        self.tick
    }

    pub fn pending(&self) -> Option<&Transition> {
        self.pending.as_ref()
    }

    pub fn policy(&self) -> &dyn Policy {
        self.policy.as_ref()
    }

    pub fn policy_mut(&mut self) -> &mut dyn Policy {
        self.policy.as_mut()
    }

    pub fn statistics(&self) -> &RunStatistics {
        &self.stats
    }

    /// End-of-run summary for everything driven so far
    pub fn summary(&self) -> RunSummary {
        self.stats
            .summarize(self.policy.name(), self.policy.table_size())
    }
}
