//! Discrete value types shared by the agent and its collaborators

use std::fmt;

use serde::{Deserialize, Serialize};

/// Traffic-light color at the agent's current intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Light {
    Red,
    Green,
}

impl fmt::Display for Light {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Light::Red => write!(f, "red"),
            Light::Green => write!(f, "green"),
        }
    }
}

/// Direction suggested by the route planner for the next move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waypoint {
    /// Already at the destination
    None,
    Forward,
    Left,
    Right,
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Waypoint::None => write!(f, "none"),
            Waypoint::Forward => write!(f, "forward"),
            Waypoint::Left => write!(f, "left"),
            Waypoint::Right => write!(f, "right"),
        }
    }
}

/// Time pressure band derived from the remaining deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Patient,
    Normal,
    Urgent,
}

impl Urgency {
    /// Deadlines strictly above this value are patient
    pub const PATIENT_ABOVE: i64 = 38;
    /// Deadlines at or below this value are urgent
    pub const URGENT_AT_MOST: i64 = 14;

    /// Classify a remaining-deadline tick count
    pub fn from_deadline(remaining: i64) -> Self {
        if remaining > Self::PATIENT_ABOVE {
            Urgency::Patient
        } else if remaining > Self::URGENT_AT_MOST {
            Urgency::Normal
        } else {
            Urgency::Urgent
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Urgency::Patient => write!(f, "patient"),
            Urgency::Normal => write!(f, "normal"),
            Urgency::Urgent => write!(f, "urgent"),
        }
    }
}

/// One of the four driving actions available in every state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    NoOp,
    Forward,
    Left,
    Right,
}

impl Action {
    /// Fixed enumeration order used for every value lookup
    pub const ALL: [Action; 4] = [Action::NoOp, Action::Forward, Action::Left, Action::Right];

    /// Position of this action in [`Action::ALL`]
    pub fn index(self) -> usize {
        match self {
            Action::NoOp => 0,
            Action::Forward => 1,
            Action::Left => 2,
            Action::Right => 3,
        }
    }

    /// Whether taking this action follows the planner's suggestion
    pub fn follows(self, waypoint: Waypoint) -> bool {
        matches!(
            (self, waypoint),
            (Action::NoOp, Waypoint::None)
                | (Action::Forward, Waypoint::Forward)
                | (Action::Left, Waypoint::Left)
                | (Action::Right, Waypoint::Right)
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::NoOp => write!(f, "no-op"),
            Action::Forward => write!(f, "forward"),
            Action::Left => write!(f, "left"),
            Action::Right => write!(f, "right"),
        }
    }
}

/// Abstracted driving state
///
/// Compared and hashed structurally: two percepts that produce the same field
/// values are the same state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    pub light: Light,
    pub next_waypoint: Waypoint,
    pub urgency: Urgency,
}

impl State {
    pub const fn new(light: Light, next_waypoint: Waypoint, urgency: Urgency) -> Self {
        Self {
            light,
            next_waypoint,
            urgency,
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(light={}, next_waypoint={}, urgency={})",
            self.light, self.next_waypoint, self.urgency
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_indices_follow_enumeration_order() {
        for (idx, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.index(), idx);
        }
    }

    #[test]
    fn urgency_bands() {
        assert_eq!(Urgency::from_deadline(100), Urgency::Patient);
        assert_eq!(Urgency::from_deadline(39), Urgency::Patient);
        assert_eq!(Urgency::from_deadline(38), Urgency::Normal);
        assert_eq!(Urgency::from_deadline(15), Urgency::Normal);
        assert_eq!(Urgency::from_deadline(14), Urgency::Urgent);
        assert_eq!(Urgency::from_deadline(-3), Urgency::Urgent);
    }

    #[test]
    fn no_op_follows_only_an_empty_waypoint() {
        assert!(Action::NoOp.follows(Waypoint::None));
        assert!(!Action::NoOp.follows(Waypoint::Forward));
        assert!(Action::Left.follows(Waypoint::Left));
        assert!(!Action::Right.follows(Waypoint::Left));
    }

    #[test]
    fn action_serializes_kebab_case() {
        let json = serde_json::to_string(&Action::NoOp).unwrap();
        assert_eq!(json, "\"no-op\"");
    }
}
