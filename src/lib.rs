//! Smartcab: a tabular Q-learning driving agent
//!
//! This crate provides:
//! - State abstraction from traffic-light percepts, planner waypoints and
//!   deadline urgency
//! - A sparse value table with an optimistic default
//! - Epsilon-greedy action selection with random tie-breaking
//! - One-step Q-learning updates driven by an episode controller
//! - Run statistics, reporting observers and a reference grid world

pub mod analysis;
pub mod app;
pub mod cli;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod state;
pub mod types;
pub mod world;

pub use error::{Error, Result};
pub use state::{Percept, abstract_state};
pub use types::{Action, Light, State, Urgency, Waypoint};
