//! Ports (trait boundaries) for external dependencies
//!
//! This module defines the interfaces between the learning agent and its
//! collaborators. Following hexagonal architecture, these traits are owned by
//! the domain and implemented by adapters: the policies in [`crate::q_learning`]
//! and [`crate::pipeline`], the reference grid in [`crate::world`], and the
//! reporting observers.

pub mod environment;
pub mod observer;
pub mod policy;

pub use environment::{Cell, Compass, Pose, RoutePlanner, Simulation, TripStatus};
pub use observer::Observer;
pub use policy::{Policy, Transition};
