use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// Distance in miles
/// Prevents mixing up distances and durations in segment arithmetic
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct DistanceMiles(pub f64);

impl DistanceMiles {
    /// Get the raw miles value
    pub fn as_miles(self) -> f64 {
        self.0
    }
}

impl fmt::Display for DistanceMiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}mi", self.0)
    }
}

impl Add for DistanceMiles {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        DistanceMiles(self.0 + other.0)
    }
}

impl Sum for DistanceMiles {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(DistanceMiles::default(), Add::add)
    }
}

/// Drive duration in hours
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct DriveHours(pub f64);

impl DriveHours {
    /// Get the raw hours value
    pub fn as_hours(self) -> f64 {
        self.0
    }

    pub fn exceeds(self, limit_hours: f64) -> bool {
        self.0 > limit_hours
    }
}

impl fmt::Display for DriveHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}h", self.0)
    }
}

impl Add for DriveHours {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        DriveHours(self.0 + other.0)
    }
}

impl Sum for DriveHours {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(DriveHours::default(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_miles_sum() {
        let legs = [DistanceMiles(300.0), DistanceMiles(120.0)];
        assert_eq!((legs[0] + legs[1]).as_miles(), 420.0);

        let total: DistanceMiles = legs.into_iter().sum();
        assert_eq!(total.as_miles(), 420.0);
        assert_eq!(
            std::iter::empty::<DistanceMiles>().sum::<DistanceMiles>(),
            DistanceMiles(0.0)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(DistanceMiles(261.94).to_string(), "261.9mi");
        assert_eq!(DriveHours(4.4321).to_string(), "4.43h");
    }

    #[test]
    fn test_drive_hours_sum_and_exceeds() {
        let total: DriveHours = [DriveHours(4.5), DriveHours(5.25)].into_iter().sum();
        assert_eq!(total.as_hours(), 9.75);
        assert!(total.exceeds(8.0));
        assert!(!DriveHours(6.0).exceeds(6.0));
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&DistanceMiles(12.5)).unwrap();
        assert_eq!(json, "12.5");
    }
}
