//! Configuration types for agent creation

use std::{fmt, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result, pipeline::RunConfig, q_learning::EpsilonSchedule, world::WorldConfig,
};

/// Which policy drives the cab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    #[default]
    QLearning,
    Random,
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyKind::QLearning => write!(f, "q-learning"),
            PolicyKind::Random => write!(f, "random"),
        }
    }
}

impl FromStr for PolicyKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "q-learning" | "qlearning" | "q" => Ok(PolicyKind::QLearning),
            "random" | "baseline" => Ok(PolicyKind::Random),
            other => Err(Error::invalid_config(format!(
                "unknown policy '{other}' (expected 'q-learning' or 'random')"
            ))),
        }
    }
}

/// Configuration for creating a driving agent
///
/// # Examples
///
/// ```
/// use smartcab::app::{AgentConfig, PolicyKind};
/// use smartcab::q_learning::EpsilonSchedule;
///
/// let config = AgentConfig::new(PolicyKind::QLearning)
///     .with_learning_rate(0.5)
///     .with_discount_factor(0.2)
///     .with_exploration(EpsilonSchedule::constant(0.05))
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub policy: PolicyKind,
    /// Learning rate α
    pub learning_rate: f64,
    /// Discount factor γ
    pub discount_factor: f64,
    /// Value of state-action pairs never updated
    pub q_init: f64,
    pub exploration: EpsilonSchedule,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentConfig {
    /// Create a configuration for `policy` with default hyper-parameters:
    /// α = 0.5, γ = 0.2, default value 9.0, default epsilon schedule.
    pub fn new(policy: PolicyKind) -> Self {
        Self {
            policy,
            learning_rate: 0.5,
            discount_factor: 0.2,
            q_init: 9.0,
            exploration: EpsilonSchedule::default(),
            seed: None,
        }
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_q_init(mut self, q_init: f64) -> Self {
        self.q_init = q_init;
        self
    }

    pub fn with_exploration(mut self, exploration: EpsilonSchedule) -> Self {
        self.exploration = exploration;
        self
    }

    /// Set the random seed for deterministic behavior
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check hyper-parameters are usable
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(Error::invalid_config(format!(
                "learning rate must be within (0, 1], got {}",
                self.learning_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return Err(Error::invalid_config(format!(
                "discount factor must be within [0, 1], got {}",
                self.discount_factor
            )));
        }
        if !self.q_init.is_finite() {
            return Err(Error::invalid_config(format!(
                "default value must be finite, got {}",
                self.q_init
            )));
        }
        self.exploration.validate()
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new(PolicyKind::default())
    }
}

/// Everything needed to run an experiment, as stored in a JSON file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub agent: AgentConfig,
    pub world: WorldConfig,
    pub run: RunConfig,
}

impl ExperimentConfig {
    /// Load a configuration file. Missing fields take their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read config '{}'", path.display()),
            source,
        })?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.agent.validate()?;
        self.world.validate()
    }
}
