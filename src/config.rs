use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ScoringStrategy {
    Simple, // Distance-match only, priority ignored
    #[default]
    Weighted, // Distance match plus heritage priority bonus
}

impl std::str::FromStr for ScoringStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simple" => Ok(ScoringStrategy::Simple),
            "weighted" => Ok(ScoringStrategy::Weighted),
            _ => Err(format!(
                "Invalid scoring strategy: {}. Use 'simple' or 'weighted'",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Strategy for scoring destination candidates at each selection step
    pub scoring_strategy: ScoringStrategy,

    /// Conservative average speed (mph) used to estimate the minimum day count.
    /// Deliberately below the drive-time model's highway tiers so days are not
    /// under-provisioned.
    pub planning_speed_mph: f64,

    /// Corridor-position slack before a move away from the destination counts
    /// as backtracking (position units, 0.1 degree longitude each when derived)
    pub sequence_tolerance: f64,

    /// Minimum distance (miles) between any two stops, endpoints included
    pub min_spacing_miles: f64,

    /// Score bonus for a maximum-priority candidate. Compared against the
    /// distance-match error expressed as a fraction of the step's target
    /// increment, so 0.15 lets a heritage stop win a 15% worse match.
    pub priority_bonus_weight: f64,

    /// Candidates with priority below this are minor-tier stops
    pub minor_tier_priority_threshold: f64,

    /// How much worse (fraction of target increment) a higher-tier substitute
    /// may match the target when breaking a run of three minor stops
    pub tier_substitution_tolerance: f64,

    /// Maximum extra distance, as a fraction of the direct distance, for a real
    /// waypoint to count as lying along an over-long segment
    pub max_route_deviation_pct: f64,

    /// Extra split attempts allowed per over-long segment beyond
    /// ceil(distance / max safe distance)
    pub split_budget_slack: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            scoring_strategy: ScoringStrategy::default(),
            planning_speed_mph: 50.0,
            sequence_tolerance: 2.0,
            min_spacing_miles: 40.0,
            priority_bonus_weight: 0.15,
            minor_tier_priority_threshold: 3.0,
            tier_substitution_tolerance: 0.25,
            max_route_deviation_pct: 0.20,
            split_budget_slack: 1,
        }
    }
}

impl PlannerConfig {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        let defaults = Self::default();

        let config = Self {
            scoring_strategy: env::var("PLANNER_SCORING_STRATEGY")
                .unwrap_or_else(|_| "weighted".to_string())
                .parse()?,

            planning_speed_mph: env::var("PLANNER_PLANNING_SPEED_MPH")
                .unwrap_or_else(|_| defaults.planning_speed_mph.to_string())
                .parse()
                .map_err(|_| "Invalid PLANNER_PLANNING_SPEED_MPH")?,

            sequence_tolerance: env::var("PLANNER_SEQUENCE_TOLERANCE")
                .unwrap_or_else(|_| defaults.sequence_tolerance.to_string())
                .parse()
                .map_err(|_| "Invalid PLANNER_SEQUENCE_TOLERANCE")?,

            min_spacing_miles: env::var("PLANNER_MIN_SPACING_MILES")
                .unwrap_or_else(|_| defaults.min_spacing_miles.to_string())
                .parse()
                .map_err(|_| "Invalid PLANNER_MIN_SPACING_MILES")?,

            priority_bonus_weight: env::var("PLANNER_PRIORITY_BONUS_WEIGHT")
                .unwrap_or_else(|_| defaults.priority_bonus_weight.to_string())
                .parse()
                .map_err(|_| "Invalid PLANNER_PRIORITY_BONUS_WEIGHT")?,

            minor_tier_priority_threshold: env::var("PLANNER_MINOR_TIER_THRESHOLD")
                .unwrap_or_else(|_| defaults.minor_tier_priority_threshold.to_string())
                .parse()
                .map_err(|_| "Invalid PLANNER_MINOR_TIER_THRESHOLD")?,

            tier_substitution_tolerance: env::var("PLANNER_TIER_SUBSTITUTION_TOLERANCE")
                .unwrap_or_else(|_| defaults.tier_substitution_tolerance.to_string())
                .parse()
                .map_err(|_| "Invalid PLANNER_TIER_SUBSTITUTION_TOLERANCE")?,

            max_route_deviation_pct: env::var("PLANNER_MAX_ROUTE_DEVIATION_PCT")
                .unwrap_or_else(|_| defaults.max_route_deviation_pct.to_string())
                .parse()
                .map_err(|_| "Invalid PLANNER_MAX_ROUTE_DEVIATION_PCT")?,

            split_budget_slack: env::var("PLANNER_SPLIT_BUDGET_SLACK")
                .unwrap_or_else(|_| defaults.split_budget_slack.to_string())
                .parse()
                .map_err(|_| "Invalid PLANNER_SPLIT_BUDGET_SLACK")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the algorithms meaningless
    pub fn validate(&self) -> Result<(), String> {
        if !self.planning_speed_mph.is_finite() || self.planning_speed_mph <= 0.0 {
            return Err("planning_speed_mph must be a positive number".to_string());
        }

        let non_negative = [
            ("sequence_tolerance", self.sequence_tolerance),
            ("min_spacing_miles", self.min_spacing_miles),
            ("priority_bonus_weight", self.priority_bonus_weight),
            (
                "minor_tier_priority_threshold",
                self.minor_tier_priority_threshold,
            ),
            (
                "tier_substitution_tolerance",
                self.tier_substitution_tolerance,
            ),
            ("max_route_deviation_pct", self.max_route_deviation_pct),
        ];

        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be a non-negative number", name));
            }
        }

        Ok(())
    }
}
