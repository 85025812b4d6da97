//! Observer implementations for driving runs
//!
//! Observers allow composable data collection during a run without coupling
//! the run loop to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::episode::{TickRecord, TripOutcome};
use crate::{Result, analysis::RunSummary, ports::Observer};

/// Progress bar observer - Shows run progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    reached: usize,
    timed_out: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            reached: 0,
            timed_out: 0,
        }
    }

    fn message(&self) -> String {
        format!("reached:{} timed out:{}", self.reached, self.timed_out)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_run_start(&mut self, total_trips: usize) -> Result<()> {
        let pb = ProgressBar::new(total_trips as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} trips ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_trip_end(&mut self, trip: usize, outcome: TripOutcome) -> Result<()> {
        if outcome.is_success() {
            self.reached += 1;
        } else {
            self.timed_out += 1;
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(trip as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_run_end(&mut self, _summary: &RunSummary) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Per-trip numbers collected by [`MetricsObserver`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TripMetrics {
    pub trip: usize,
    pub reward: f64,
    pub ticks: usize,
    pub reached: bool,
}

/// Metrics observer - Tracks per-trip rewards and outcomes
pub struct MetricsObserver {
    trips: Vec<TripMetrics>,
    current_reward: f64,
    window: usize,
}

impl MetricsObserver {
    /// Create a new metrics observer with a 10-trip rolling window
    pub fn new() -> Self {
        Self::with_window(10)
    }

    /// Create a metrics observer whose rolling success rate spans `window` trips
    pub fn with_window(window: usize) -> Self {
        Self {
            trips: Vec::new(),
            current_reward: 0.0,
            window: window.max(1),
        }
    }

    pub fn trips(&self) -> &[TripMetrics] {
        &self.trips
    }

    /// Fraction of all trips that reached the destination
    pub fn success_rate(&self) -> f64 {
        if self.trips.is_empty() {
            0.0
        } else {
            self.trips.iter().filter(|t| t.reached).count() as f64 / self.trips.len() as f64
        }
    }

    /// Success rate over the most recent `window` trips
    pub fn recent_success_rate(&self) -> f64 {
        let start = self.trips.len().saturating_sub(self.window);
        let recent = &self.trips[start..];
        if recent.is_empty() {
            0.0
        } else {
            recent.iter().filter(|t| t.reached).count() as f64 / recent.len() as f64
        }
    }

    /// Get average trip length in ticks
    pub fn avg_trip_length(&self) -> f64 {
        if self.trips.is_empty() {
            0.0
        } else {
            self.trips.iter().map(|t| t.ticks).sum::<usize>() as f64 / self.trips.len() as f64
        }
    }

    /// Get average total reward per trip
    pub fn avg_trip_reward(&self) -> f64 {
        if self.trips.is_empty() {
            0.0
        } else {
            self.trips.iter().map(|t| t.reward).sum::<f64>() / self.trips.len() as f64
        }
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_trip_start(&mut self, _trip: usize) -> Result<()> {
        self.current_reward = 0.0;
        Ok(())
    }

    fn on_tick(&mut self, record: &TickRecord) -> Result<()> {
        self.current_reward += record.reward;
        Ok(())
    }

    fn on_trip_end(&mut self, trip: usize, outcome: TripOutcome) -> Result<()> {
        self.trips.push(TripMetrics {
            trip,
            reward: self.current_reward,
            ticks: outcome.ticks(),
            reached: outcome.is_success(),
        });
        Ok(())
    }

    fn on_run_end(&mut self, _summary: &RunSummary) -> Result<()> {
        info!(
            success_rate = self.success_rate(),
            recent_success_rate = self.recent_success_rate(),
            window = self.window,
            avg_trip_length = self.avg_trip_length(),
            avg_trip_reward = self.avg_trip_reward(),
            "trip metrics"
        );
        Ok(())
    }
}

/// JSONL observer - Writes one tick record per line
pub struct JsonlObserver {
    writer: BufWriter<File>,
}

impl JsonlObserver {
    /// Create a new JSONL observer
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_tick(&mut self, record: &TickRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_trip_end(&mut self, _trip: usize, _outcome: TripOutcome) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn on_run_end(&mut self, _summary: &RunSummary) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
