//! Q-learning driving policy
//!
//! Epsilon-greedy action selection with randomized tie-breaking over a sparse
//! value table, and the one-step off-policy TD update.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    Error, Result,
    ports::{Policy, Transition},
    q_learning::q_table::ValueTable,
    types::{Action, State},
};

/// Two-phase exploration schedule
///
/// Trips with index below `training_trips` explore at `training`; every later
/// trip uses `evaluation`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpsilonSchedule {
    pub training: f64,
    pub evaluation: f64,
    pub training_trips: usize,
}

impl EpsilonSchedule {
    /// Same exploration rate for every trip
    pub fn constant(epsilon: f64) -> Self {
        Self {
            training: epsilon,
            evaluation: epsilon,
            training_trips: 0,
        }
    }

    pub fn epsilon_for_trip(&self, trip: usize) -> f64 {
        if trip < self.training_trips {
            self.training
        } else {
            self.evaluation
        }
    }

    /// Check both rates lie in `[0, 1]`
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("training", self.training), ("evaluation", self.evaluation)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::invalid_config(format!(
                    "{name} epsilon must be within [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for EpsilonSchedule {
    fn default() -> Self {
        Self {
            training: 0.3,
            evaluation: 0.01,
            training_trips: 10,
        }
    }
}

/// Q-learning policy (off-policy TD control)
///
/// Learns the optimal value function by always bootstrapping from the best
/// next-state value, regardless of the action the policy takes next.
#[derive(Debug, Clone)]
pub struct QLearningPolicy {
    table: ValueTable,
    schedule: EpsilonSchedule,
    epsilon: f64,
    rng: StdRng,
}

impl QLearningPolicy {
    /// Create a new Q-learning policy
    ///
    /// # Arguments
    ///
    /// * `learning_rate` - α parameter (0.0 to 1.0)
    /// * `discount_factor` - γ parameter (0.0 to 1.0)
    /// * `q_init` - Value of unseen state-action pairs
    /// * `schedule` - Exploration rate per trip phase
    pub fn new(
        learning_rate: f64,
        discount_factor: f64,
        q_init: f64,
        schedule: EpsilonSchedule,
    ) -> Self {
        Self {
            table: ValueTable::new(learning_rate, discount_factor, q_init),
            schedule,
            epsilon: schedule.epsilon_for_trip(0),
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Replace the random source used for exploration and tie-breaks
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut ValueTable {
        &mut self.table
    }

    /// ε-greedy action selection with uniform tie-breaking among maxima
    pub fn choose(&mut self, state: &State) -> Action {
        let max_q = self.table.get_max(state);
        let values = self.table.values(state);

        if self.rng.random::<f64>() < self.epsilon {
            // Explore: any action
            let idx = self.rng.random_range(0..Action::ALL.len());
            return Action::ALL[idx];
        }

        // Exploit: break ties at random so early choices are not biased
        // toward the first enumerated action
        let best: Vec<Action> = Action::ALL
            .iter()
            .zip(values)
            .filter(|(_, q)| *q == max_q)
            .map(|(action, _)| *action)
            .collect();
        best.choose(&mut self.rng).copied().unwrap_or(Action::NoOp)
    }
}

impl Policy for QLearningPolicy {
    fn choose_action(&mut self, state: &State) -> Action {
        self.choose(state)
    }

    fn learn(&mut self, transition: &Transition, next_state: &State) -> Result<()> {
        let td_error = self.table.update(
            transition.state,
            transition.action,
            transition.reward,
            next_state,
        );
        trace!(
            state = %transition.state,
            action = %transition.action,
            reward = transition.reward,
            td_error,
            "value table updated"
        );
        Ok(())
    }

    fn begin_trip(&mut self, trip: usize) {
        self.epsilon = self.schedule.epsilon_for_trip(trip);
    }

    fn name(&self) -> &str {
        "Q-Learning"
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    fn action_values(&self, state: &State) -> Option<[f64; 4]> {
        Some(self.table.values(state))
    }

    fn epsilon(&self) -> Option<f64> {
        Some(self.epsilon)
    }

    fn table_size(&self) -> Option<usize> {
        Some(self.table.size())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
