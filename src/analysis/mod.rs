//! Run statistics and reporting
//!
//! Accumulates trip outcomes and rewards over a run and turns them into the
//! end-of-run summary.

pub mod stats;

pub use stats::{RemainingTimeStats, RunStatistics, RunSummary};
