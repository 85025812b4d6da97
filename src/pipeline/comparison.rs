//! Comparison framework for evaluating several policies on the same world
//!
//! Every policy drives the same sequence of trips: each gets a fresh
//! [`GridWorld`] built from the same seed, so lights, start cells and
//! destinations line up trip for trip.

use serde::{Deserialize, Serialize};

use super::{
    episode::EpisodeController,
    training::{RunConfig, TrainingPipeline},
};
use crate::{
    Result,
    analysis::RunSummary,
    ports::Policy,
    world::{GridPlanner, GridWorld, WorldConfig},
};

/// Results of a comparison, one summary per policy in input order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub world_seed: u64,
    pub summaries: Vec<RunSummary>,
}

impl ComparisonResult {
    /// Policy with the highest success percentage (first one wins ties)
    pub fn best(&self) -> Option<&RunSummary> {
        self.summaries.iter().fold(None, |best, summary| match best {
            Some(current) if current.success_percentage >= summary.success_percentage => {
                Some(current)
            }
            _ => Some(summary),
        })
    }
}

/// Runs each policy through identically seeded worlds
pub struct ComparisonFramework {
    policies: Vec<Box<dyn Policy>>,
    world: WorldConfig,
    run: RunConfig,
    world_seed: u64,
}

impl ComparisonFramework {
    /// Create a new comparison framework
    pub fn new(policies: Vec<Box<dyn Policy>>, world: WorldConfig, run: RunConfig) -> Self {
        let world_seed = run.seed.unwrap_or_else(rand::random);
        Self {
            policies,
            world,
            run,
            world_seed,
        }
    }

    /// Fix the seed every world is built from
    pub fn with_world_seed(mut self, seed: u64) -> Self {
        self.world_seed = seed;
        self
    }

    /// Drive every policy for the configured number of trips
    pub fn compare(self) -> Result<ComparisonResult> {
        let mut summaries = Vec::with_capacity(self.policies.len());
        for policy in self.policies {
            let mut world = GridWorld::new(self.world.clone(), self.world_seed)?;
            let mut planner = GridPlanner::new();
            let mut controller = EpisodeController::new(policy);
            let mut pipeline = TrainingPipeline::new(self.run.clone());
            summaries.push(pipeline.run(&mut world, &mut planner, &mut controller)?);
        }
        Ok(ComparisonResult {
            world_seed: self.world_seed,
            summaries,
        })
    }
}
