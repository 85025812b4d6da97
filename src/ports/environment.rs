//! Simulation and route-planner ports
//!
//! The grid world, its traffic lights and the route planner live outside the
//! learning agent. The agent reaches them only through these two traits.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    state::Percept,
    types::{Action, Waypoint},
};

/// Grid coordinate. `x` grows east, `y` grows south
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan(self, other: Cell) -> i64 {
        i64::from((self.x - other.x).abs()) + i64::from((self.y - other.y).abs())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Compass heading of the agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compass {
    North,
    East,
    South,
    West,
}

impl Compass {
    pub const ALL: [Compass; 4] = [Compass::North, Compass::East, Compass::South, Compass::West];

    /// Unit step `(dx, dy)` for this heading
    pub fn delta(self) -> (i32, i32) {
        match self {
            Compass::North => (0, -1),
            Compass::East => (1, 0),
            Compass::South => (0, 1),
            Compass::West => (-1, 0),
        }
    }

    pub fn turn_left(self) -> Self {
        match self {
            Compass::North => Compass::West,
            Compass::West => Compass::South,
            Compass::South => Compass::East,
            Compass::East => Compass::North,
        }
    }

    pub fn turn_right(self) -> Self {
        match self {
            Compass::North => Compass::East,
            Compass::East => Compass::South,
            Compass::South => Compass::West,
            Compass::West => Compass::North,
        }
    }

    /// Whether this heading runs along the north-south axis
    pub fn is_north_south(self) -> bool {
        matches!(self, Compass::North | Compass::South)
    }
}

/// Where the agent is and which way it faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pose {
    pub location: Cell,
    pub heading: Compass,
}

/// Trip state reported at the end of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    Active,
    TimedOut,
}

/// Turn-based world the agent drives in
///
/// # Event Sequence
///
/// 1. `start_trip()` once per trip
/// 2. For each tick: `sense()`, `deadline()`, `pose()`, `act(action)`,
///    `done()`, then `advance()`
pub trait Simulation {
    /// Place the agent for a new trip and return its destination
    fn start_trip(&mut self) -> Result<Cell>;

    /// Percept at the agent's current cell
    fn sense(&self) -> Result<Percept>;

    /// Ticks remaining before the deadline. May go negative when the
    /// deadline is not enforced.
    fn deadline(&self) -> i64;

    /// Current position and heading
    fn pose(&self) -> Pose;

    /// Execute an action and return its reward
    ///
    /// Rule-violation penalties are already folded into the reward
    fn act(&mut self, action: Action) -> Result<f64>;

    /// Whether the agent reached its destination on the last `act`
    fn done(&self) -> bool;

    /// Close the tick: advance lights, spend one deadline tick and report
    /// whether the trip may continue.
    fn advance(&mut self) -> TripStatus;
}

/// Computes the next heading toward a destination
pub trait RoutePlanner {
    /// (Re)compute the route at trip start
    fn route_to(&mut self, destination: Cell);

    /// Direction to take from `pose`
    fn next_waypoint(&self, pose: Pose) -> Waypoint;
}
