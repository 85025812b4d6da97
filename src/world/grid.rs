//! Toroidal city grid with cycling traffic lights

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::planner::waypoint_toward;
use crate::{
    Error, Result,
    ports::{Cell, Compass, Pose, Simulation, TripStatus},
    state::Percept,
    types::{Action, Light},
};

/// Trips end here when the deadline is not enforced
pub const HARD_TIME_LIMIT: i64 = -100;

const MIN_TRIP_DISTANCE: i64 = 4;
const REACHED_BONUS: f64 = 10.0;
const FOLLOWED_WAYPOINT: f64 = 2.0;
const IGNORED_WAYPOINT: f64 = -0.5;
const ILLEGAL_MOVE: f64 = -1.0;

/// Largest grid a world will allocate intersections for
pub const MAX_CELLS: usize = 1 << 20;
/// Largest deadline factor accepted
pub const MAX_DEADLINE_FACTOR: i64 = 1_000;

/// Grid world configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub columns: i32,
    pub rows: i32,
    /// End the trip when the deadline runs out
    pub enforce_deadline: bool,
    /// Deadline ticks granted per cell of Manhattan distance
    pub deadline_factor: i64,
}

impl WorldConfig {
    pub fn validate(&self) -> Result<()> {
        self.cells()?;
        if !(1..=MAX_DEADLINE_FACTOR).contains(&self.deadline_factor) {
            return Err(Error::invalid_config(format!(
                "deadline factor must be within 1..={MAX_DEADLINE_FACTOR}, got {}",
                self.deadline_factor
            )));
        }
        Ok(())
    }

    /// Number of intersections, or an error when the grid is out of range
    pub fn cells(&self) -> Result<usize> {
        if self.columns < 2 || self.rows < 2 {
            return Err(Error::invalid_config(format!(
                "grid must be at least 2x2, got {}x{}",
                self.columns, self.rows
            )));
        }
        self.columns
            .checked_mul(self.rows)
            .and_then(|cells| usize::try_from(cells).ok())
            .filter(|cells| *cells <= MAX_CELLS)
            .ok_or_else(|| {
                Error::invalid_config(format!(
                    "grid of {}x{} exceeds {MAX_CELLS} cells",
                    self.columns, self.rows
                ))
            })
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            columns: 8,
            rows: 6,
            enforce_deadline: true,
            deadline_factor: 5,
        }
    }
}

#[derive(Debug, Clone)]
struct Intersection {
    north_south_green: bool,
    period: u32,
    elapsed: u32,
}

impl Intersection {
    fn random(rng: &mut StdRng) -> Self {
        Self {
            north_south_green: rng.random_bool(0.5),
            period: rng.random_range(3..=5),
            elapsed: 0,
        }
    }

    fn light_for(&self, heading: Compass) -> Light {
        if self.north_south_green == heading.is_north_south() {
            Light::Green
        } else {
            Light::Red
        }
    }

    fn tick(&mut self) {
        self.elapsed += 1;
        if self.elapsed >= self.period {
            self.north_south_green = !self.north_south_green;
            self.elapsed = 0;
        }
    }
}

#[derive(Debug, Clone)]
struct Trip {
    pose: Pose,
    destination: Cell,
    deadline: i64,
    done: bool,
}

/// Single-agent grid simulation
///
/// Movement wraps around the edges. Every cell is an intersection whose
/// light gives right of way to one axis at a time.
#[derive(Debug, Clone)]
pub struct GridWorld {
    config: WorldConfig,
    intersections: Vec<Intersection>,
    trip: Option<Trip>,
    rng: StdRng,
}

impl GridWorld {
    /// Build a world with lights and trips drawn from `seed`
    pub fn new(config: WorldConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let cells = config.cells()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let intersections = (0..cells).map(|_| Intersection::random(&mut rng)).collect();
        Ok(Self {
            config,
            intersections,
            trip: None,
            rng,
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Destination of the current trip
    pub fn destination(&self) -> Option<Cell> {
        self.trip.as_ref().map(|trip| trip.destination)
    }

    fn index(&self, cell: Cell) -> usize {
        (cell.y * self.config.columns + cell.x) as usize
    }

    fn light_at(&self, pose: Pose) -> Light {
        self.intersections[self.index(pose.location)].light_for(pose.heading)
    }

    fn random_cell(&mut self) -> Cell {
        Cell::new(
            self.rng.random_range(0..self.config.columns),
            self.rng.random_range(0..self.config.rows),
        )
    }

    fn step_from(&self, cell: Cell, heading: Compass) -> Cell {
        let (dx, dy) = heading.delta();
        Cell::new(
            (cell.x + dx).rem_euclid(self.config.columns),
            (cell.y + dy).rem_euclid(self.config.rows),
        )
    }
}

impl Simulation for GridWorld {
    fn start_trip(&mut self) -> Result<Cell> {
        let widest = i64::from(self.config.columns - 1) + i64::from(self.config.rows - 1);
        let min_distance = MIN_TRIP_DISTANCE.min(widest);

        let start = self.random_cell();
        let mut destination = self.random_cell();
        while start.manhattan(destination) < min_distance {
            destination = self.random_cell();
        }
        let heading = Compass::ALL[self.rng.random_range(0..Compass::ALL.len())];

        self.trip = Some(Trip {
            pose: Pose {
                location: start,
                heading,
            },
            destination,
            deadline: start.manhattan(destination) * self.config.deadline_factor,
            done: false,
        });
        Ok(destination)
    }

    fn sense(&self) -> Result<Percept> {
        let trip = self.trip.as_ref().ok_or(Error::TripNotStarted)?;
        Ok(Percept::with_light(self.light_at(trip.pose)))
    }

    fn deadline(&self) -> i64 {
        self.trip.as_ref().map_or(0, |trip| trip.deadline)
    }

    fn pose(&self) -> Pose {
        self.trip.as_ref().map_or(
            Pose {
                location: Cell::new(0, 0),
                heading: Compass::North,
            },
            |trip| trip.pose,
        )
    }

    fn act(&mut self, action: Action) -> Result<f64> {
        let trip = self.trip.as_ref().ok_or(Error::TripNotStarted)?;
        let pose = trip.pose;
        let destination = trip.destination;
        let deadline = trip.deadline;
        let light = self.light_at(pose);

        let heading = match action {
            Action::NoOp => None,
            Action::Forward => (light == Light::Green).then_some(pose.heading),
            Action::Left => (light == Light::Green).then(|| pose.heading.turn_left()),
            Action::Right => Some(pose.heading.turn_right()),
        };

        let mut next_pose = pose;
        let mut reward = match (action, heading) {
            (Action::NoOp, _) => 0.0,
            (_, Some(heading)) => {
                next_pose = Pose {
                    location: self.step_from(pose.location, heading),
                    heading,
                };
                if action.follows(waypoint_toward(pose, destination)) {
                    FOLLOWED_WAYPOINT
                } else {
                    IGNORED_WAYPOINT
                }
            }
            (_, None) => ILLEGAL_MOVE,
        };

        let reached = next_pose.location == destination;
        if reached && deadline >= 0 {
            reward += REACHED_BONUS;
        }

        if let Some(trip) = self.trip.as_mut() {
            trip.pose = next_pose;
            trip.done = reached;
        }
        Ok(reward)
    }

    fn done(&self) -> bool {
        self.trip.as_ref().is_some_and(|trip| trip.done)
    }

    fn advance(&mut self) -> TripStatus {
        for intersection in &mut self.intersections {
            intersection.tick();
        }
        let Some(trip) = self.trip.as_mut() else {
            return TripStatus::TimedOut;
        };
        trip.deadline -= 1;
        let out_of_time = if self.config.enforce_deadline {
            trip.deadline <= 0
        } else {
            trip.deadline <= HARD_TIME_LIMIT
        };
        if out_of_time {
            TripStatus::TimedOut
        } else {
            TripStatus::Active
        }
    }
}
