//! Run-level statistics and the end-of-run summary

use std::fmt;

use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Distribution, Max, Median, Min};

use crate::Result;

/// Counters accumulated over every trip of one run
///
/// Never reset except by constructing a new agent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStatistics {
    trips: usize,
    successes: usize,
    positive_reward: f64,
    negative_reward: f64,
    remaining_times: Vec<i64>,
}

impl RunStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_trip_start(&mut self) {
        self.trips += 1;
    }

    /// Add a reward to the positive or negative accumulator by sign
    ///
    /// Zero counts as positive
    pub fn record_reward(&mut self, reward: f64) {
        if reward < 0.0 {
            self.negative_reward += reward;
        } else {
            self.positive_reward += reward;
        }
    }

    /// Record a trip that reached its destination with `remaining` ticks left
    pub fn record_success(&mut self, remaining: i64) {
        self.successes += 1;
        self.remaining_times.push(remaining);
    }

    pub fn trips(&self) -> usize {
        self.trips
    }

    pub fn successes(&self) -> usize {
        self.successes
    }

    pub fn positive_reward(&self) -> f64 {
        self.positive_reward
    }

    pub fn negative_reward(&self) -> f64 {
        self.negative_reward
    }

    pub fn net_reward(&self) -> f64 {
        self.positive_reward + self.negative_reward
    }

    pub fn remaining_times(&self) -> &[i64] {
        &self.remaining_times
    }

    /// Successful trips as a percentage of all trips started
    pub fn success_percentage(&self) -> f64 {
        if self.trips == 0 {
            0.0
        } else {
            self.successes as f64 / self.trips as f64 * 100.0
        }
    }

    /// Mean remaining deadline over successful trips
    ///
    /// `None` when no trip succeeded
    pub fn average_remaining_time(&self) -> Option<f64> {
        if self.remaining_times.is_empty() {
            return None;
        }
        let total: i64 = self.remaining_times.iter().sum();
        Some(total as f64 / self.remaining_times.len() as f64)
    }

    /// Distribution of remaining deadlines over successful trips
    pub fn remaining_time_stats(&self) -> Option<RemainingTimeStats> {
        if self.remaining_times.is_empty() {
            return None;
        }
        let data = Data::new(
            self.remaining_times
                .iter()
                .map(|&t| t as f64)
                .collect::<Vec<f64>>(),
        );
        Some(RemainingTimeStats {
            mean: data.mean().unwrap_or(f64::NAN),
            median: data.median(),
            std_dev: data.std_dev().filter(|value| value.is_finite()),
            min: data.min(),
            max: data.max(),
        })
    }

    /// Build the end-of-run summary
    pub fn summarize(&self, policy: &str, table_entries: Option<usize>) -> RunSummary {
        RunSummary {
            policy: policy.to_string(),
            trips: self.trips,
            successes: self.successes,
            success_percentage: self.success_percentage(),
            positive_reward: self.positive_reward,
            negative_reward: self.negative_reward,
            net_reward: self.net_reward(),
            average_remaining_time: self.average_remaining_time(),
            remaining_time: self.remaining_time_stats(),
            table_entries,
        }
    }
}

/// Summary of remaining deadlines at successful completions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RemainingTimeStats {
    pub mean: f64,
    pub median: f64,
    /// `None` for a single success
    pub std_dev: Option<f64>,
    pub min: f64,
    pub max: f64,
}

/// End-of-run report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub policy: String,
    pub trips: usize,
    pub successes: usize,
    pub success_percentage: f64,
    pub positive_reward: f64,
    pub negative_reward: f64,
    pub net_reward: f64,
    pub average_remaining_time: Option<f64>,
    pub remaining_time: Option<RemainingTimeStats>,
    pub table_entries: Option<usize>,
}

impl RunSummary {
    /// Save summary to a JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load summary from a JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let summary = serde_json::from_reader(file)?;
        Ok(summary)
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Performance of {} is: {:.2}% ({}/{} trips)",
            self.policy, self.success_percentage, self.successes, self.trips
        )?;
        writeln!(f, "Total negative reward: {}", self.negative_reward)?;
        writeln!(f, "Total positive reward: {}", self.positive_reward)?;
        writeln!(f, "Net reward: {}", self.net_reward)?;
        match self.average_remaining_time {
            Some(average) => write!(f, "Average remaining time: {average:.4}"),
            None => write!(f, "Average remaining time: no successful trips"),
        }
    }
}
