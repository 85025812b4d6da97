//! Reference grid world
//!
//! A single-agent, turn-based city grid with traffic lights at every
//! intersection, plus the planner that steers toward the destination. It
//! implements the [`Simulation`](crate::ports::Simulation) and
//! [`RoutePlanner`](crate::ports::RoutePlanner) ports so the agent can be run
//! end to end from the command line.

pub mod grid;
pub mod planner;

pub use grid::{GridWorld, HARD_TIME_LIMIT, WorldConfig};
pub use planner::{GridPlanner, waypoint_toward};
