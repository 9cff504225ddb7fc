use crate::constants::{LONGITUDE_POSITION_OFFSET, LONGITUDE_POSITION_SCALE};
use crate::models::Waypoint;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Increasing,
    Decreasing,
}

impl Direction {
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Increasing => 1.0,
            Direction::Decreasing => -1.0,
        }
    }
}

/// Locates waypoints along the corridor and judges progression.
///
/// Positions come from the waypoint's explicit `sequence_position` when
/// present, otherwise from its longitude.
#[derive(Debug, Clone, Copy)]
pub struct SequenceOracle {
    tolerance: f64,
}

impl SequenceOracle {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance: tolerance.max(0.0),
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn position_of(waypoint: &Waypoint) -> f64 {
        waypoint.sequence_position.unwrap_or_else(|| {
            (waypoint.coordinates.lng + LONGITUDE_POSITION_OFFSET) * LONGITUDE_POSITION_SCALE
        })
    }

    pub fn direction(start: &Waypoint, end: &Waypoint) -> Direction {
        if Self::position_of(end) >= Self::position_of(start) {
            Direction::Increasing
        } else {
            Direction::Decreasing
        }
    }

    /// Signed progress from `from` to `to` in the direction of travel
    pub fn progress(from: &Waypoint, to: &Waypoint, direction: Direction) -> f64 {
        (Self::position_of(to) - Self::position_of(from)) * direction.sign()
    }

    /// True iff moving from `current` to `candidate` does not leave the trip
    /// further from `destination` than it already is, and does not overshoot
    /// the destination, beyond the short-detour tolerance.
    pub fn is_forward_progression(
        &self,
        current: &Waypoint,
        candidate: &Waypoint,
        destination: &Waypoint,
    ) -> bool {
        let final_position = Self::position_of(destination);
        let remaining_now = (final_position - Self::position_of(current)).abs();
        let remaining_after = (final_position - Self::position_of(candidate)).abs();

        if remaining_after > remaining_now + self.tolerance {
            return false;
        }

        // Passing the destination counts as moving away from it
        let direction = Self::direction(current, destination);
        Self::progress(candidate, destination, direction) >= -self.tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, WaypointCategory};

    fn at_lng(id: &str, lng: f64) -> Waypoint {
        Waypoint::new(
            id,
            id,
            Coordinates::new(35.0, lng).unwrap(),
            WaypointCategory::DestinationCity,
            "XX",
        )
    }

    #[test]
    fn test_position_from_longitude() {
        let chicago = at_lng("chicago", -87.6298);
        assert!((SequenceOracle::position_of(&chicago) - 123.702).abs() < 1e-9);
    }

    #[test]
    fn test_explicit_position_wins() {
        let stop = at_lng("stop", -95.0).with_sequence_position(7.0);
        assert_eq!(SequenceOracle::position_of(&stop), 7.0);
    }

    #[test]
    fn test_direction() {
        let chicago = at_lng("chicago", -87.6);
        let los_angeles = at_lng("la", -118.2);
        assert_eq!(
            SequenceOracle::direction(&chicago, &los_angeles),
            Direction::Decreasing
        );
        assert_eq!(
            SequenceOracle::direction(&los_angeles, &chicago),
            Direction::Increasing
        );
    }

    #[test]
    fn test_forward_progression_westbound() {
        let oracle = SequenceOracle::new(2.0);
        let current = at_lng("current", -95.0);
        let destination = at_lng("destination", -110.0);

        assert!(oracle.is_forward_progression(&current, &at_lng("ahead", -100.0), &destination));
        // 0.1 degree back is inside the 2.0-unit (0.2 degree) tolerance
        assert!(oracle.is_forward_progression(&current, &at_lng("detour", -94.9), &destination));
        assert!(!oracle.is_forward_progression(&current, &at_lng("behind", -93.0), &destination));
        assert!(!oracle.is_forward_progression(&current, &at_lng("past", -112.0), &destination));
    }

    #[test]
    fn test_zero_tolerance_rejects_any_retreat() {
        let oracle = SequenceOracle::new(0.0);
        let current = at_lng("current", -95.0);
        let destination = at_lng("destination", -110.0);
        assert!(!oracle.is_forward_progression(&current, &at_lng("detour", -94.9), &destination));
        assert!(oracle.is_forward_progression(&current, &at_lng("same", -95.0), &destination));
    }
}
