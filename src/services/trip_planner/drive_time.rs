use crate::constants::*;
use crate::models::DriveHours;

/// Tiered distance-to-duration estimate.
///
/// Short hops are slower (towns, traffic lights) and carry a larger buffer;
/// long highway stretches are faster. Each tier never reports less than the
/// previous tier's upper edge, so the curve is non-decreasing. At
/// [`HARD_CAP_DISTANCE_MILES`] and beyond the estimate is pinned to the
/// absolute safety ceiling.
pub struct DriveTimeModel;

impl DriveTimeModel {
    pub fn estimate(miles: f64) -> DriveHours {
        if miles.is_nan() || miles <= 0.0 {
            return DriveHours(MIN_DRIVE_TIME_HOURS);
        }

        let mut floor = MIN_DRIVE_TIME_HOURS;
        for &(upper_miles, speed_mph, buffer) in DRIVE_TIME_TIERS.iter() {
            if miles < upper_miles {
                return DriveHours((miles / speed_mph * buffer).max(floor));
            }
            floor = floor.max(upper_miles / speed_mph * buffer);
        }

        DriveHours(ABSOLUTE_SAFETY_CEILING_HOURS)
    }

    /// Longest distance whose estimate stays within `limit_hours`.
    /// Always below the hard-cap distance; 0 when even the minimum drive time
    /// exceeds the limit.
    pub fn max_distance_within(limit_hours: f64) -> f64 {
        if Self::estimate(0.0).exceeds(limit_hours) {
            return 0.0;
        }

        let mut lo = 0.0;
        let mut hi = HARD_CAP_DISTANCE_MILES;
        while hi - lo > MAX_SAFE_DISTANCE_PRECISION_MILES {
            let mid = (lo + hi) / 2.0;
            if Self::estimate(mid).exceeds(limit_hours) {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        lo
    }
}
