use crate::constants::{MAX_PRIORITY, SYNTHETIC_STOP_ID_PREFIX, SYNTHETIC_STOP_LABEL};
use crate::error::{PlannerError, Result};
use crate::models::Coordinates;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WaypointCategory {
    /// Eligible as an overnight stop
    DestinationCity,
    Attraction,
    /// Interpolated stop inserted by the planner; never accepted from a catalog
    DriveBreak,
    Other,
}

impl fmt::Display for WaypointCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WaypointCategory::DestinationCity => "destination_city",
            WaypointCategory::Attraction => "attraction",
            WaypointCategory::DriveBreak => "drive_break",
            WaypointCategory::Other => "other",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for WaypointCategory {
    type Err = String;

    /// Unknown categories map to `Other`; they are valid entries, just never
    /// overnight stops.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "destination_city" => Ok(WaypointCategory::DestinationCity),
            "attraction" => Ok(WaypointCategory::Attraction),
            "drive_break" => Ok(WaypointCategory::DriveBreak),
            "" => Err("Empty waypoint category".to_string()),
            _ => Ok(WaypointCategory::Other),
        }
    }
}

/// A validated, georeferenced catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Waypoint {
    pub id: String,
    pub name: String,
    pub coordinates: Coordinates,
    pub category: WaypointCategory,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_position: Option<f64>,
    /// Heritage significance, 0-10 (higher = more canonical)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<f64>,
}

impl Waypoint {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        coordinates: Coordinates,
        category: WaypointCategory,
        state: impl Into<String>,
    ) -> Self {
        Waypoint {
            id: id.into(),
            name: name.into(),
            coordinates,
            category,
            state: state.into(),
            sequence_position: None,
            priority: None,
        }
    }

    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = Some(priority.clamp(0.0, MAX_PRIORITY));
        self
    }

    pub fn with_sequence_position(mut self, position: f64) -> Self {
        self.sequence_position = Some(position);
        self
    }

    /// Interpolated stop splitting an over-long day. Ids are derived from the
    /// day being split so repeated runs produce identical plans.
    pub fn drive_break(
        day_index: u32,
        ordinal: usize,
        coordinates: Coordinates,
        state: impl Into<String>,
        sequence_position: Option<f64>,
    ) -> Self {
        Waypoint {
            id: format!("{}-{}-{}", SYNTHETIC_STOP_ID_PREFIX, day_index, ordinal),
            name: format!("{} {}", SYNTHETIC_STOP_LABEL, ordinal),
            coordinates,
            category: WaypointCategory::DriveBreak,
            state: state.into(),
            sequence_position,
            priority: None,
        }
    }

    pub fn is_destination_city(&self) -> bool {
        self.category == WaypointCategory::DestinationCity
    }

    pub fn is_synthetic(&self) -> bool {
        self.category == WaypointCategory::DriveBreak
    }

    /// Drive-break ids are minted by the planner; a catalog may not claim them
    pub fn is_reserved_id(id: &str) -> bool {
        id.starts_with(SYNTHETIC_STOP_ID_PREFIX)
    }

    /// Priority on the 0-10 scale, 0 when absent
    pub fn priority_score(&self) -> f64 {
        self.priority.unwrap_or(0.0).clamp(0.0, MAX_PRIORITY)
    }

    pub fn distance_to(&self, other: &Waypoint) -> f64 {
        self.coordinates.distance_to(&other.coordinates)
    }
}

/// Raw catalog entry as supplied by the waypoint data source.
/// Converted into a [`Waypoint`] once, at the catalog boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub category: String,
    #[serde(default)]
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<f64>,
    #[serde(
        default,
        alias = "sequencePosition",
        skip_serializing_if = "Option::is_none"
    )]
    pub sequence_position: Option<f64>,
}

impl CatalogEntry {
    pub fn into_waypoint(self) -> Result<Waypoint> {
        let id = self.id.trim().to_string();
        if id.is_empty() {
            return Err(PlannerError::InvalidWaypoint(format!(
                "Entry '{}' has an empty id",
                self.name
            )));
        }

        if Waypoint::is_reserved_id(&id) {
            return Err(PlannerError::InvalidWaypoint(format!(
                "Entry '{}' uses the reserved '{}' id prefix",
                id, SYNTHETIC_STOP_ID_PREFIX
            )));
        }

        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(PlannerError::InvalidWaypoint(format!(
                "Entry '{}' has an empty name",
                id
            )));
        }

        let coordinates = Coordinates::new(self.latitude, self.longitude)
            .map_err(|e| PlannerError::InvalidWaypoint(format!("Entry '{}': {}", id, e)))?;

        let category: WaypointCategory = self
            .category
            .parse()
            .map_err(|e| PlannerError::InvalidWaypoint(format!("Entry '{}': {}", id, e)))?;
        if category == WaypointCategory::DriveBreak {
            return Err(PlannerError::InvalidWaypoint(format!(
                "Entry '{}' uses the reserved drive_break category",
                id
            )));
        }

        if self.priority.is_some_and(|p| !p.is_finite()) {
            return Err(PlannerError::InvalidWaypoint(format!(
                "Entry '{}' has a non-finite priority",
                id
            )));
        }
        if self.sequence_position.is_some_and(|p| !p.is_finite()) {
            return Err(PlannerError::InvalidWaypoint(format!(
                "Entry '{}' has a non-finite sequence position",
                id
            )));
        }

        Ok(Waypoint {
            id,
            name,
            coordinates,
            category,
            state: self.state.trim().to_string(),
            sequence_position: self.sequence_position,
            priority: self.priority.map(|p| p.clamp(0.0, MAX_PRIORITY)),
        })
    }
}
