//! Non-learning baseline policy

use rand::{Rng, SeedableRng, random, rngs::StdRng};

use crate::{
    ports::Policy,
    types::{Action, State},
};

/// Uniform random policy
///
/// Picks any of the four actions with equal probability and never learns.
/// Serves as the reference point the Q-learning policy is compared against.
pub struct RandomPolicy {
    name: String,
    rng: StdRng,
}

impl RandomPolicy {
    /// Create a new random policy
    pub fn new(name: String) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(random()),
        }
    }

    /// Create a new random policy with a deterministic seed
    pub fn with_seed(name: String, seed: u64) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn choose_action(&mut self, _state: &State) -> Action {
        let index = self.rng.random_range(0..Action::ALL.len());
        Action::ALL[index]
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
