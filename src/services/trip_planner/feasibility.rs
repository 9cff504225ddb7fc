use crate::models::{PlanWarning, StyleConfig, WarningKind, Waypoint};

/// Result of checking a requested day count against the drive-time limit
#[derive(Debug, Clone, PartialEq)]
pub struct FeasibilityAssessment {
    pub total_distance_miles: f64,
    pub requested_days: u32,
    pub minimum_days: u32,
    pub effective_days: u32,
    pub warnings: Vec<PlanWarning>,
}

/// Raises the day count when the request cannot fit the daily drive limit
pub struct FeasibilityEstimator {
    planning_speed_mph: f64,
}

impl FeasibilityEstimator {
    pub fn new(planning_speed_mph: f64) -> Self {
        Self { planning_speed_mph }
    }

    /// Fewest days that keep every day within the style's limit at the
    /// planning speed. Always at least one.
    pub fn minimum_days(&self, total_distance_miles: f64, style: &StyleConfig) -> u32 {
        let daily_reach = style.effective_limit_hours() * self.planning_speed_mph;
        if daily_reach <= 0.0 || !daily_reach.is_finite() {
            return 1;
        }
        ((total_distance_miles / daily_reach).ceil() as u32).max(1)
    }

    pub fn assess(
        &self,
        start: &Waypoint,
        end: &Waypoint,
        style: &StyleConfig,
        requested_days: u32,
    ) -> FeasibilityAssessment {
        let total_distance_miles = start.distance_to(end);
        let minimum_days = self.minimum_days(total_distance_miles, style);
        let mut warnings = Vec::new();

        if style.exceeds_safety_ceiling() {
            warnings.push(PlanWarning::warning(
                WarningKind::SafetyCeiling,
                format!(
                    "Style '{}' allows {:.1}h per day, above the {:.1}h safety ceiling; \
                     the ceiling applies",
                    style.style_name,
                    style.max_daily_drive_hours,
                    style.effective_limit_hours()
                ),
            ));
        }

        let effective_days = if requested_days < minimum_days {
            tracing::info!(
                requested_days,
                minimum_days,
                total_miles = %format!("{:.1}", total_distance_miles),
                "Raising day count from {} to {} to respect {:.1}h daily limit",
                requested_days,
                minimum_days,
                style.effective_limit_hours()
            );
            warnings.push(PlanWarning::warning(
                WarningKind::FeasibilityAdjustment,
                format!(
                    "Requested {} days but at least {} are needed: {:.0} miles at {:.0} mph \
                     with a {:.1}h daily limit. Planning {} days.",
                    requested_days,
                    minimum_days,
                    total_distance_miles,
                    self.planning_speed_mph,
                    style.effective_limit_hours(),
                    minimum_days
                ),
            ));
            minimum_days
        } else {
            requested_days
        };

        FeasibilityAssessment {
            total_distance_miles,
            requested_days,
            minimum_days,
            effective_days,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, EnforcementLevel, WaypointCategory};

    fn city(id: &str, lat: f64, lng: f64) -> Waypoint {
        Waypoint::new(
            id,
            id,
            Coordinates::new(lat, lng).unwrap(),
            WaypointCategory::DestinationCity,
            "XX",
        )
    }

    #[test]
    fn test_minimum_days() {
        let estimator = FeasibilityEstimator::new(50.0);
        let style = StyleConfig::leisurely(); // 6h -> 300mi per day

        assert_eq!(estimator.minimum_days(0.0, &style), 1);
        assert_eq!(estimator.minimum_days(300.0, &style), 1);
        assert_eq!(estimator.minimum_days(301.0, &style), 2);
        assert_eq!(estimator.minimum_days(2_000.0, &style), 7);
    }

    #[test]
    fn test_adjusts_short_request_with_warning() {
        let estimator = FeasibilityEstimator::new(50.0);
        let chicago = city("chicago", 41.8781, -87.6298);
        let santa_monica = city("santa-monica", 34.0195, -118.4912);

        let assessment = estimator.assess(&chicago, &santa_monica, &StyleConfig::leisurely(), 3);

        assert!(assessment.effective_days > assessment.requested_days);
        assert!(assessment.effective_days >= assessment.minimum_days);
        assert_eq!(assessment.requested_days, 3);

        let warning = &assessment.warnings[0];
        assert_eq!(warning.kind, WarningKind::FeasibilityAdjustment);
        assert!(warning.message.contains("Requested 3 days"));
        assert!(warning
            .message
            .contains(&format!("at least {}", assessment.minimum_days)));
    }

    #[test]
    fn test_keeps_generous_request() {
        let estimator = FeasibilityEstimator::new(50.0);
        let chicago = city("chicago", 41.8781, -87.6298);
        let st_louis = city("st-louis", 38.6270, -90.1994);

        let assessment = estimator.assess(&chicago, &st_louis, &StyleConfig::leisurely(), 2);
        assert_eq!(assessment.effective_days, assessment.requested_days);
        assert_eq!(assessment.effective_days, 2);
        assert!(assessment.warnings.is_empty());
    }

    #[test]
    fn test_safety_ceiling_warning() {
        let estimator = FeasibilityEstimator::new(50.0);
        let a = city("a", 35.0, -100.0);
        let b = city("b", 35.0, -101.0);
        let style = StyleConfig::new("marathon", 12.0, EnforcementLevel::Moderate);

        let assessment = estimator.assess(&a, &b, &style, 1);
        assert!(assessment
            .warnings
            .iter()
            .any(|w| w.kind == WarningKind::SafetyCeiling));
    }
}
