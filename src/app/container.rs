//! Factory for wiring policies, worlds and controllers from configuration

use tracing::debug;

use super::config::{AgentConfig, ExperimentConfig, PolicyKind};
use crate::{
    Result,
    pipeline::{EpisodeController, RandomPolicy, TrainingPipeline},
    ports::Policy,
    q_learning::QLearningPolicy,
    world::{GridPlanner, GridWorld, WorldConfig},
};

/// Application factory
///
/// Centralizes creation of the policy, the reference world and the run
/// pipeline so the CLI and tests wire them identically.
///
/// # Examples
///
/// ```
/// use smartcab::app::{AgentConfig, App, PolicyKind};
///
/// let app = App::new().with_default_seed(42);
/// let policy = app.create_policy(&AgentConfig::new(PolicyKind::QLearning))?;
/// assert_eq!(policy.name(), "Q-Learning");
/// # Ok::<(), smartcab::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct App {
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed used when a configuration does not carry its own
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the policy selected by `config`
    pub fn create_policy(&self, config: &AgentConfig) -> Result<Box<dyn Policy>> {
        config.validate()?;
        let seed = config.seed.or(self.default_seed);
        debug!(policy = %config.policy, ?seed, "creating policy");

        let policy: Box<dyn Policy> = match config.policy {
            PolicyKind::QLearning => {
                let policy = QLearningPolicy::new(
                    config.learning_rate,
                    config.discount_factor,
                    config.q_init,
                    config.exploration,
                );
                Box::new(match seed {
                    Some(seed) => policy.with_seed(seed),
                    None => policy,
                })
            }
            PolicyKind::Random => Box::new(match seed {
                Some(seed) => RandomPolicy::with_seed("Random".to_string(), seed),
                None => RandomPolicy::new("Random".to_string()),
            }),
        };
        Ok(policy)
    }

    /// Build the reference world and its planner
    pub fn create_world(&self, config: &WorldConfig) -> Result<(GridWorld, GridPlanner)> {
        let seed = self.default_seed.unwrap_or_else(rand::random);
        Ok((GridWorld::new(config.clone(), seed)?, GridPlanner::new()))
    }

    /// Build a controller around the configured policy
    pub fn create_controller(&self, config: &AgentConfig) -> Result<EpisodeController> {
        Ok(EpisodeController::new(self.create_policy(config)?))
    }

    /// Build a pipeline for `config.run` with no observers attached
    pub fn create_pipeline(&self, config: &ExperimentConfig) -> TrainingPipeline {
        TrainingPipeline::new(config.run.clone())
    }
}
