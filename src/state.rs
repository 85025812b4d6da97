//! State abstraction: raw percepts to compact discrete states

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    types::{Light, State, Urgency, Waypoint},
};

/// Raw sensor reading returned by a simulation for the agent's current cell
///
/// Fields are optional on the wire; a simulation that fails to report the
/// light produces a percept that cannot be abstracted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Percept {
    #[serde(default)]
    pub light: Option<Light>,
}

impl Percept {
    pub fn with_light(light: Light) -> Self {
        Self { light: Some(light) }
    }
}

/// Build the discrete state for one tick
///
/// Pure: the same percept, deadline and waypoint always give the same state
///
/// # Errors
///
/// Returns [`Error::MissingPerceptField`] if the percept carries no light
pub fn abstract_state(
    percept: &Percept,
    remaining_deadline: i64,
    suggested: Waypoint,
) -> Result<State> {
    let light = percept
        .light
        .ok_or(Error::MissingPerceptField { field: "light" })?;
    Ok(State::new(
        light,
        suggested,
        Urgency::from_deadline(remaining_deadline),
    ))
}
