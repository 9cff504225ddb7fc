use crate::constants::EARTH_RADIUS_MILES;
use crate::error::{PlannerError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(PlannerError::InvalidWaypoint(format!(
                "Invalid latitude: {} (must be between -90 and 90)",
                lat
            )));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(PlannerError::InvalidWaypoint(format!(
                "Invalid longitude: {} (must be between -180 and 180)",
                lng
            )));
        }
        Ok(Coordinates { lat, lng })
    }

    /// Great-circle distance to `other` using the Haversine formula.
    /// Returns distance in miles. Symmetric, and exactly 0 for identical points.
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        if self == other {
            return 0.0;
        }

        let lat1_rad = self.lat.to_radians();
        let lat2_rad = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lng = (other.lng - self.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_MILES * c
    }

    /// Linear interpolation in latitude/longitude space.
    /// `t = 0.0` yields `self`, `t = 1.0` yields `other`.
    pub fn interpolate(&self, other: &Coordinates, t: f64) -> Coordinates {
        let t = t.clamp(0.0, 1.0);
        Coordinates {
            lat: self.lat + (other.lat - self.lat) * t,
            lng: self.lng + (other.lng - self.lng) * t,
        }
    }
}
