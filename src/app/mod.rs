//! Application layer: configuration and wiring
//!
//! `AgentConfig`, `WorldConfig` and `RunConfig` make up an
//! [`ExperimentConfig`], which can be loaded from JSON. [`App`] turns a
//! configuration into a policy, a reference world and a run pipeline.
//!
//! # Usage
//!
//! ```
//! use smartcab::app::{App, ExperimentConfig};
//!
//! let config = ExperimentConfig::default();
//! let app = App::new().with_default_seed(42);
//! let controller = app.create_controller(&config.agent)?;
//! let (world, planner) = app.create_world(&config.world)?;
//! # Ok::<(), smartcab::Error>(())
//! ```

pub mod config;
pub mod container;

pub use config::{AgentConfig, ExperimentConfig, PolicyKind};
pub use container::App;
