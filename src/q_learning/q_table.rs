//! Value table for temporal difference learning

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{Action, State};

/// Sparse mapping from (state, action) pairs to value estimates
///
/// Pairs that were never written read as `q_init`, an optimistic default
/// that pushes the agent to try every action at least once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueTable {
    /// Q-values: (state, action) -> Q-value
    q_values: HashMap<(State, Action), f64>,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
    /// Initial Q-value for unseen state-action pairs
    q_init: f64,
}

impl ValueTable {
    /// Create a new value table
    pub fn new(learning_rate: f64, discount_factor: f64, q_init: f64) -> Self {
        Self {
            q_values: HashMap::new(),
            learning_rate,
            discount_factor,
            q_init,
        }
    }

    /// Get Q-value for a state-action pair
    ///
    /// Reading never materializes an entry
    pub fn get(&self, state: &State, action: Action) -> f64 {
        *self
            .q_values
            .get(&(*state, action))
            .unwrap_or(&self.q_init)
    }

    /// Values of every action in [`Action::ALL`] order
    pub fn values(&self, state: &State) -> [f64; 4] {
        Action::ALL.map(|action| self.get(state, action))
    }

    /// Get maximum Q-value over all actions in a state
    pub fn get_max(&self, state: &State) -> f64 {
        self.values(state)
            .into_iter()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: State, action: Action, value: f64) {
        self.q_values.insert((state, action), value);
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// An absent pair starts from `q_init`, so the first correction is
    /// relative to the default. Returns the TD error.
    pub fn update(&mut self, state: State, action: Action, reward: f64, next_state: &State) -> f64 {
        let max_next_q = self.get_max(next_state);
        let td_target = reward + self.discount_factor * max_next_q;
        let q_init = self.q_init;
        let learning_rate = self.learning_rate;
        let entry = self.q_values.entry((state, action)).or_insert(q_init);
        let td_error = td_target - *entry;
        *entry += learning_rate * td_error;
        td_error
    }

    /// Whether a pair has been written
    pub fn contains(&self, state: &State, action: Action) -> bool {
        self.q_values.contains_key(&(*state, action))
    }

    /// Get total number of Q-values stored
    pub fn size(&self) -> usize {
        self.q_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q_values.is_empty()
    }
}
