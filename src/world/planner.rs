//! Route planner for the reference grid

use crate::{
    ports::{Cell, Pose, RoutePlanner},
    types::Waypoint,
};

/// Direction to take from `pose` to close in on `destination`
///
/// East-west offset is closed first, then north-south. Facing directly away
/// yields `Right` (the long way round).
pub fn waypoint_toward(pose: Pose, destination: Cell) -> Waypoint {
    let dx = destination.x - pose.location.x;
    let dy = destination.y - pose.location.y;
    let (hx, hy) = pose.heading.delta();

    if dx == 0 && dy == 0 {
        Waypoint::None
    } else if dx != 0 {
        if dx * hx > 0 {
            Waypoint::Forward
        } else if dx * hx < 0 {
            Waypoint::Right
        } else if dx * hy > 0 {
            Waypoint::Left
        } else {
            Waypoint::Right
        }
    } else if dy * hy > 0 {
        Waypoint::Forward
    } else if dy * hy < 0 {
        Waypoint::Right
    } else if dy * hx > 0 {
        Waypoint::Right
    } else {
        Waypoint::Left
    }
}

/// Planner that remembers the current destination
#[derive(Debug, Clone, Default)]
pub struct GridPlanner {
    destination: Option<Cell>,
}

impl GridPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn destination(&self) -> Option<Cell> {
        self.destination
    }
}

impl RoutePlanner for GridPlanner {
    fn route_to(&mut self, destination: Cell) {
        self.destination = Some(destination);
    }

    fn next_waypoint(&self, pose: Pose) -> Waypoint {
        self.destination
            .map_or(Waypoint::None, |destination| waypoint_toward(pose, destination))
    }
}
