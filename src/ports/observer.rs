//! Observer port - abstraction for run observation and reporting
//!
//! This port defines the interface for observing driving runs, allowing
//! composable data collection without coupling the run loop to specific
//! output formats or metrics.

use crate::{
    Result,
    analysis::RunSummary,
    pipeline::episode::{TickRecord, TripOutcome},
};

/// Observer trait for monitoring a run
///
/// Observers can be composed to collect different types of data:
/// - Progress bars for user feedback
/// - JSONL export of per-tick diagnostics
/// - Metrics tracking for evaluation
///
/// # Event Sequence
///
/// The observer methods are called in the following order:
/// 1. `on_run_start(total_trips)` - Once at the beginning
/// 2. For each trip:
///    - `on_trip_start(trip)`
///    - `on_tick(record)` - For each tick of the trip
///    - `on_trip_end(trip, outcome)`
/// 3. `on_run_end(summary)` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use smartcab::{pipeline::episode::TripOutcome, ports::Observer};
///
/// struct CountingObserver {
///     reached: usize,
/// }
///
/// impl Observer for CountingObserver {
///     fn on_trip_end(&mut self, _trip: usize, outcome: TripOutcome) -> smartcab::Result<()> {
///         if outcome.is_success() {
///             self.reached += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when the run starts
    fn on_run_start(&mut self, _total_trips: usize) -> Result<()> {
        Ok(())
    }

    /// Called when a trip starts
    fn on_trip_start(&mut self, _trip: usize) -> Result<()> {
        Ok(())
    }

    /// Called after every tick with the tick's diagnostic record
    fn on_tick(&mut self, _record: &TickRecord) -> Result<()> {
        Ok(())
    }

    /// Called when a trip reaches its destination or times out
    fn on_trip_end(&mut self, _trip: usize, _outcome: TripOutcome) -> Result<()> {
        Ok(())
    }

    /// Called when the run completes, with the end-of-run summary
    fn on_run_end(&mut self, _summary: &RunSummary) -> Result<()> {
        Ok(())
    }
}
