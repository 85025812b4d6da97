//! Scripted collaborators shared by the integration tests.
//!
//! Each scripted trip is a list of ticks. The pose reported to the planner
//! carries the tick index in `location.x`, which is how the scripted planner
//! finds the waypoint for that tick.

#![allow(dead_code)]

use smartcab::{
    Action, Light, Percept, Result, Waypoint,
    ports::{Cell, Compass, Pose, RoutePlanner, Simulation, TripStatus},
};

#[derive(Debug, Clone, Copy)]
pub struct ScriptedTick {
    pub light: Light,
    pub deadline: i64,
    pub waypoint: Waypoint,
    pub reward: f64,
    pub done: bool,
    /// Sense a percept that carries no light
    pub blind: bool,
}

impl ScriptedTick {
    pub fn new(light: Light, deadline: i64, waypoint: Waypoint, reward: f64) -> Self {
        Self {
            light,
            deadline,
            waypoint,
            reward,
            done: false,
            blind: false,
        }
    }

    pub fn finishing(mut self) -> Self {
        self.done = true;
        self
    }

    pub fn without_light(mut self) -> Self {
        self.blind = true;
        self
    }
}

pub struct ScriptedSimulation {
    trips: Vec<Vec<ScriptedTick>>,
    trip: Option<usize>,
    cursor: usize,
    acted: bool,
    pub actions: Vec<Action>,
}

impl ScriptedSimulation {
    pub fn new(trips: Vec<Vec<ScriptedTick>>) -> Self {
        Self {
            trips,
            trip: None,
            cursor: 0,
            acted: false,
            actions: Vec::new(),
        }
    }

    fn current(&self) -> &ScriptedTick {
        let trip = self.trip.unwrap_or(0);
        &self.trips[trip][self.cursor]
    }

    pub fn planner(&self) -> ScriptedPlanner {
        ScriptedPlanner {
            trips: self
                .trips
                .iter()
                .map(|ticks| ticks.iter().map(|tick| tick.waypoint).collect())
                .collect(),
            trip: 0,
            routed: 0,
        }
    }
}

impl Simulation for ScriptedSimulation {
    fn start_trip(&mut self) -> Result<Cell> {
        let next = self.trip.map_or(0, |trip| trip + 1);
        self.trip = Some(next);
        self.cursor = 0;
        self.acted = false;
        Ok(Cell::new(next as i32, 99))
    }

    fn sense(&self) -> Result<Percept> {
        let tick = self.current();
        if tick.blind {
            Ok(Percept::default())
        } else {
            Ok(Percept::with_light(tick.light))
        }
    }

    fn deadline(&self) -> i64 {
        self.current().deadline
    }

    fn pose(&self) -> Pose {
        Pose {
            location: Cell::new(self.cursor as i32, 0),
            heading: Compass::North,
        }
    }

    fn act(&mut self, action: Action) -> Result<f64> {
        self.acted = true;
        self.actions.push(action);
        Ok(self.current().reward)
    }

    fn done(&self) -> bool {
        self.acted && self.current().done
    }

    fn advance(&mut self) -> TripStatus {
        let trip = self.trip.unwrap_or(0);
        self.cursor += 1;
        self.acted = false;
        if self.cursor >= self.trips[trip].len() {
            self.cursor = self.trips[trip].len() - 1;
            TripStatus::TimedOut
        } else {
            TripStatus::Active
        }
    }
}

pub struct ScriptedPlanner {
    trips: Vec<Vec<Waypoint>>,
    trip: usize,
    pub routed: usize,
}

impl RoutePlanner for ScriptedPlanner {
    fn route_to(&mut self, destination: Cell) {
        self.trip = destination.x as usize;
        self.routed += 1;
    }

    fn next_waypoint(&self, pose: Pose) -> Waypoint {
        self.trips[self.trip][pose.location.x as usize]
    }
}
