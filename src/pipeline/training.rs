//! Multi-trip run loop

use std::{thread, time::Duration};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::episode::{EpisodeController, TripOutcome};
use crate::{
    Result,
    analysis::RunSummary,
    ports::{Observer, RoutePlanner, Simulation, TripStatus},
};

/// Run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of trips to drive
    pub trials: usize,

    /// Random seed applied to the policy before the first trip
    pub seed: Option<u64>,

    /// Pause between ticks, for pacing a live display
    pub update_delay_ms: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            trials: 100,
            seed: None,
            update_delay_ms: 0,
        }
    }
}

/// Runs trips back to back, feeding every tick to the registered observers
pub struct TrainingPipeline {
    config: RunConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new pipeline
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Drive `trials` trips and return the run summary
    ///
    /// Each trip ends when the simulation reports the destination reached or
    /// the deadline exhausted. Errors stop the run at the failing tick.
    pub fn run(
        &mut self,
        sim: &mut dyn Simulation,
        planner: &mut dyn RoutePlanner,
        controller: &mut EpisodeController,
    ) -> Result<RunSummary> {
        if let Some(seed) = self.config.seed {
            controller.policy_mut().set_rng_seed(seed);
        }

        for observer in &mut self.observers {
            observer.on_run_start(self.config.trials)?;
        }

        for _ in 0..self.config.trials {
            let trip = controller.statistics().trips();
            for observer in &mut self.observers {
                observer.on_trip_start(trip)?;
            }

            let outcome = self.drive_trip(sim, planner, controller)?;
            debug!(trip, ?outcome, "trip finished");

            for observer in &mut self.observers {
                observer.on_trip_end(trip, outcome)?;
            }
        }

        let summary = controller.summary();
        info!(
            policy = %summary.policy,
            trips = summary.trips,
            success_percentage = summary.success_percentage,
            net_reward = summary.net_reward,
            "run complete"
        );

        for observer in &mut self.observers {
            observer.on_run_end(&summary)?;
        }

        Ok(summary)
    }

    fn drive_trip(
        &mut self,
        sim: &mut dyn Simulation,
        planner: &mut dyn RoutePlanner,
        controller: &mut EpisodeController,
    ) -> Result<TripOutcome> {
        let destination = sim.start_trip()?;
        controller.reset(planner, destination);

        loop {
            let record = controller.update(sim, &*planner)?;
            for observer in &mut self.observers {
                observer.on_tick(&record)?;
            }

            if record.done {
                return Ok(TripOutcome::Reached {
                    remaining: sim.deadline(),
                    ticks: controller.ticks(),
                });
            }

            if sim.advance() == TripStatus::TimedOut {
                controller.mark_timed_out();
                return Ok(TripOutcome::TimedOut {
                    ticks: controller.ticks(),
                });
            }

            if self.config.update_delay_ms > 0 {
                thread::sleep(Duration::from_millis(self.config.update_delay_ms));
            }
        }
    }
}
