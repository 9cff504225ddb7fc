use crate::constants::*;
use crate::error::{PlannerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnforcementLevel {
    Strict,
    #[default]
    Moderate,
    Flexible,
}

impl EnforcementLevel {
    /// Multiplier applied to the configured short-detour tolerance
    pub fn tolerance_scale(&self) -> f64 {
        match self {
            EnforcementLevel::Strict => STRICT_TOLERANCE_SCALE,
            EnforcementLevel::Moderate => MODERATE_TOLERANCE_SCALE,
            EnforcementLevel::Flexible => FLEXIBLE_TOLERANCE_SCALE,
        }
    }
}

impl fmt::Display for EnforcementLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnforcementLevel::Strict => write!(f, "strict"),
            EnforcementLevel::Moderate => write!(f, "moderate"),
            EnforcementLevel::Flexible => write!(f, "flexible"),
        }
    }
}

impl FromStr for EnforcementLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(EnforcementLevel::Strict),
            "moderate" => Ok(EnforcementLevel::Moderate),
            "flexible" => Ok(EnforcementLevel::Flexible),
            _ => Err(format!("Invalid enforcement level: '{}'", s)),
        }
    }
}

/// Caller-supplied trip style. Never mutated by the planner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StyleConfig {
    pub style_name: String,
    pub max_daily_drive_hours: f64,
    #[serde(default)]
    pub enforcement_level: EnforcementLevel,
}

impl StyleConfig {
    pub fn new(
        style_name: impl Into<String>,
        max_daily_drive_hours: f64,
        enforcement_level: EnforcementLevel,
    ) -> Self {
        StyleConfig {
            style_name: style_name.into(),
            max_daily_drive_hours,
            enforcement_level,
        }
    }

    pub fn leisurely() -> Self {
        Self::new("leisurely", 6.0, EnforcementLevel::Moderate)
    }

    pub fn destination_focused() -> Self {
        Self::new("destination-focused", 8.0, EnforcementLevel::Moderate)
    }

    pub fn road_warrior() -> Self {
        Self::new("road-warrior", 10.0, EnforcementLevel::Flexible)
    }

    pub fn validate(&self) -> Result<()> {
        if self.style_name.trim().is_empty() {
            return Err(PlannerError::InvalidStyleConfig(
                "style_name must not be empty".to_string(),
            ));
        }
        if !self.max_daily_drive_hours.is_finite() || self.max_daily_drive_hours <= 0.0 {
            return Err(PlannerError::InvalidStyleConfig(format!(
                "max_daily_drive_hours must be a positive number, got {}",
                self.max_daily_drive_hours
            )));
        }
        Ok(())
    }

    /// Daily limit actually enforced: the style's maximum, never above the
    /// absolute safety ceiling
    pub fn effective_limit_hours(&self) -> f64 {
        self.max_daily_drive_hours.min(ABSOLUTE_SAFETY_CEILING_HOURS)
    }

    pub fn exceeds_safety_ceiling(&self) -> bool {
        self.max_daily_drive_hours > ABSOLUTE_SAFETY_CEILING_HOURS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation() {
        assert!(StyleConfig::leisurely().validate().is_ok());
        assert!(StyleConfig::new("x", 0.0, EnforcementLevel::Strict)
            .validate()
            .is_err());
        assert!(StyleConfig::new("x", -2.0, EnforcementLevel::Strict)
            .validate()
            .is_err());
        assert!(StyleConfig::new("x", f64::INFINITY, EnforcementLevel::Strict)
            .validate()
            .is_err());
        assert!(StyleConfig::new(" ", 6.0, EnforcementLevel::Strict)
            .validate()
            .is_err());
    }

    #[test]
    fn test_effective_limit_respects_ceiling() {
        let style = StyleConfig::new("marathon", 14.0, EnforcementLevel::Moderate);
        assert!(style.exceeds_safety_ceiling());
        assert_eq!(style.effective_limit_hours(), ABSOLUTE_SAFETY_CEILING_HOURS);

        assert_eq!(StyleConfig::destination_focused().effective_limit_hours(), 8.0);
    }

    #[test]
    fn test_enforcement_level_behaviour() {
        assert!(
            EnforcementLevel::Strict.tolerance_scale()
                < EnforcementLevel::Flexible.tolerance_scale()
        );
        assert_eq!(
            "FLEXIBLE".parse::<EnforcementLevel>().unwrap(),
            EnforcementLevel::Flexible
        );
        assert!("lenient".parse::<EnforcementLevel>().is_err());
    }

    #[test]
    fn test_enforcement_level_defaults_to_moderate() {
        let style: StyleConfig =
            serde_json::from_str(r#"{"style_name":"x","max_daily_drive_hours":7.5}"#).unwrap();
        assert_eq!(style.enforcement_level, EnforcementLevel::Moderate);
    }
}
