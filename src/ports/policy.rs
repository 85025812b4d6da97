//! Policy port - abstraction over action-selection strategies
//!
//! One capability, two implementations: the tabular Q-learning policy and a
//! non-learning uniform-random baseline. The episode controller only talks to
//! this trait, so either can be selected by configuration.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    types::{Action, State},
};

/// The single pending transition an agent keeps between ticks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub state: State,
    pub action: Action,
    pub reward: f64,
}

/// Policy trait - unified interface for all driving policies
///
/// # Examples
///
/// ```no_run
/// use smartcab::{
///     ports::Policy,
///     types::{Light, State, Urgency, Waypoint},
/// };
///
/// fn drive(policy: &mut dyn Policy) {
///     let state = State::new(Light::Green, Waypoint::Forward, Urgency::Normal);
///     let _action = policy.choose_action(&state);
/// }
/// ```
pub trait Policy: Send {
    /// Select an action for the given state
    fn choose_action(&mut self, state: &State) -> Action;

    /// Apply a one-step update for `transition`, now that the state it led
    /// to is known.
    ///
    /// # Default Implementation
    ///
    /// Does nothing, suitable for non-learning policies
    fn learn(&mut self, _transition: &Transition, _next_state: &State) -> Result<()> {
        Ok(())
    }

    /// Called when trip `trip` (0-based) starts
    ///
    /// Policies with an exploration schedule switch phase here
    fn begin_trip(&mut self, _trip: usize) {}

    /// Get the policy's name
    ///
    /// Used for identification in reports and logging
    fn name(&self) -> &str;

    /// Seed the policy's internal random number generator
    ///
    /// Training pipelines call this method when supplied with a deterministic
    /// seed to ensure reproducible results.
    fn set_rng_seed(&mut self, _seed: u64) {}

    /// Current value estimate of every action in [`Action::ALL`] order, if the
    /// policy keeps one.
    fn action_values(&self, _state: &State) -> Option<[f64; 4]> {
        None
    }

    /// Current exploration rate, if the policy explores
    fn epsilon(&self) -> Option<f64> {
        None
    }

    /// Number of materialized value-table entries, if the policy keeps a table
    fn table_size(&self) -> Option<usize> {
        None
    }

    /// Enable downcasting to concrete types
    ///
    /// This allows tests and reports to reach implementation details such as
    /// the value table.
    fn as_any(&self) -> &dyn std::any::Any;
}
