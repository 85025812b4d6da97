//! Run pipeline abstractions
//!
//! This module provides composable pieces for:
//! - Driving a policy tick by tick through a trip (episode controller)
//! - Running many trips back to back
//! - Comparing policies on identically seeded worlds
//! - Recording observations during a run

pub mod baseline;
pub mod comparison;
pub mod episode;
pub mod observers;
pub mod training;

pub use baseline::RandomPolicy;
pub use comparison::{ComparisonFramework, ComparisonResult};
pub use episode::{EpisodeController, TickRecord, TripOutcome, TripPhase};
// Re-export observer implementations (adapters)
pub use observers::{JsonlObserver, MetricsObserver, ProgressObserver, TripMetrics};
pub use training::{RunConfig, TrainingPipeline};

pub use crate::ports::{Observer, Policy};
