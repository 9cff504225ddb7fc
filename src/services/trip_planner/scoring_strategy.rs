use super::distance_cache::DistanceCache;
use crate::config::PlannerConfig;
use crate::constants::MAX_PRIORITY;
use crate::models::Waypoint;

/// Context passed to scoring strategies for one selection step
pub struct ScoringContext<'a> {
    pub anchor: &'a Waypoint,
    pub target_increment_miles: f64,
    pub distances: &'a DistanceCache,
}

/// A candidate with its step score. Higher scores are better.
#[derive(Debug, Clone, Copy)]
pub struct ScoredCandidate<'a> {
    pub score: f64,
    /// |distance from anchor - target increment| / target increment
    pub distance_error: f64,
    pub waypoint: &'a Waypoint,
}

/// Trait for destination scoring strategies
pub trait DestinationScoringStrategy: Send + Sync {
    /// Score candidates that already passed sequence and spacing checks
    fn score_candidates<'a>(
        &self,
        candidates: &[&'a Waypoint],
        context: &ScoringContext,
    ) -> Vec<ScoredCandidate<'a>>;
}

/// Relative mismatch between a candidate's hop length and the step target
fn distance_error(candidate: &Waypoint, context: &ScoringContext) -> f64 {
    let hop = context.distances.between(context.anchor, candidate);
    if context.target_increment_miles <= 0.0 {
        return hop;
    }
    (hop - context.target_increment_miles).abs() / context.target_increment_miles
}

/// Distance-match only; priority is ignored
pub struct SimpleStrategy;

impl DestinationScoringStrategy for SimpleStrategy {
    fn score_candidates<'a>(
        &self,
        candidates: &[&'a Waypoint],
        context: &ScoringContext,
    ) -> Vec<ScoredCandidate<'a>> {
        candidates
            .iter()
            .map(|&waypoint| {
                let error = distance_error(waypoint, context);
                ScoredCandidate {
                    score: -error,
                    distance_error: error,
                    waypoint,
                }
            })
            .collect()
    }
}

/// Distance match plus a heritage bonus that can override a marginally
/// better match
pub struct WeightedStrategy {
    priority_bonus_weight: f64,
}

impl WeightedStrategy {
    pub fn new(config: &PlannerConfig) -> Self {
        Self {
            priority_bonus_weight: config.priority_bonus_weight,
        }
    }

    fn priority_bonus(&self, waypoint: &Waypoint) -> f64 {
        self.priority_bonus_weight * waypoint.priority_score() / MAX_PRIORITY
    }
}

impl DestinationScoringStrategy for WeightedStrategy {
    fn score_candidates<'a>(
        &self,
        candidates: &[&'a Waypoint],
        context: &ScoringContext,
    ) -> Vec<ScoredCandidate<'a>> {
        candidates
            .iter()
            .map(|&waypoint| {
                let error = distance_error(waypoint, context);
                ScoredCandidate {
                    score: self.priority_bonus(waypoint) - error,
                    distance_error: error,
                    waypoint,
                }
            })
            .collect()
    }
}

/// Sort best-first. Ties break on id so the order never depends on catalog
/// layout.
pub fn rank(scored: &mut [ScoredCandidate<'_>]) {
    scored.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.waypoint.id.cmp(&b.waypoint.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, WaypointCategory};

    fn city(id: &str, lng: f64, priority: Option<f64>) -> Waypoint {
        let waypoint = Waypoint::new(
            id,
            id,
            Coordinates::new(35.0, lng).unwrap(),
            WaypointCategory::DestinationCity,
            "XX",
        );
        match priority {
            Some(p) => waypoint.with_priority(p),
            None => waypoint,
        }
    }

    #[test]
    fn test_simple_prefers_closest_match() {
        let cache = DistanceCache::new();
        let anchor = city("anchor", -100.0, None);
        let near_target = city("near", -103.0, None);
        let far_off = city("far", -106.0, None);
        let target = anchor.distance_to(&near_target);

        let context = ScoringContext {
            anchor: &anchor,
            target_increment_miles: target,
            distances: &cache,
        };
        let mut scored = SimpleStrategy.score_candidates(&[&far_off, &near_target], &context);
        rank(&mut scored);

        assert_eq!(scored[0].waypoint.id, "near");
        assert!(scored[0].distance_error < 1e-9);
    }

    #[test]
    fn test_priority_overrides_small_margin_only() {
        let cache = DistanceCache::new();
        let anchor = city("anchor", -100.0, None);
        let exact = city("exact", -103.0, Some(0.0));
        let target = anchor.distance_to(&exact);

        // Heritage stop 10% off target beats an exact minor match with a 0.15 bonus
        let heritage_close = city("heritage", -103.3, Some(10.0));
        // but not when it is 50% off target
        let heritage_far = city("heritage-far", -104.5, Some(10.0));

        let strategy = WeightedStrategy::new(&PlannerConfig::default());
        let context = ScoringContext {
            anchor: &anchor,
            target_increment_miles: target,
            distances: &cache,
        };

        let mut scored = strategy.score_candidates(&[&exact, &heritage_close], &context);
        rank(&mut scored);
        assert_eq!(scored[0].waypoint.id, "heritage");

        let mut scored = strategy.score_candidates(&[&exact, &heritage_far], &context);
        rank(&mut scored);
        assert_eq!(scored[0].waypoint.id, "exact");
    }

    #[test]
    fn test_bonus_weight_is_tunable() {
        let cache = DistanceCache::new();
        let anchor = city("anchor", -100.0, None);
        let exact = city("exact", -103.0, None);
        let heritage = city("heritage", -103.3, Some(10.0));
        let target = anchor.distance_to(&exact);
        let context = ScoringContext {
            anchor: &anchor,
            target_increment_miles: target,
            distances: &cache,
        };

        let no_bonus = WeightedStrategy::new(&PlannerConfig {
            priority_bonus_weight: 0.0,
            ..PlannerConfig::default()
        });
        let mut scored = no_bonus.score_candidates(&[&heritage, &exact], &context);
        rank(&mut scored);
        assert_eq!(scored[0].waypoint.id, "exact");
    }

    #[test]
    fn test_rank_ties_break_on_id() {
        let cache = DistanceCache::new();
        let anchor = city("anchor", -100.0, None);
        // Mirror images around the anchor latitude give identical hop lengths
        let north = Waypoint::new(
            "b-north",
            "North",
            Coordinates::new(36.0, -102.0).unwrap(),
            WaypointCategory::DestinationCity,
            "XX",
        );
        let south = Waypoint::new(
            "a-south",
            "South",
            Coordinates::new(34.0, -102.0).unwrap(),
            WaypointCategory::DestinationCity,
            "XX",
        );
        let context = ScoringContext {
            anchor: &anchor,
            target_increment_miles: 100.0,
            distances: &cache,
        };

        let mut scored = SimpleStrategy.score_candidates(&[&north, &south], &context);
        scored[1].score = scored[0].score;
        rank(&mut scored);
        assert_eq!(scored[0].waypoint.id, "a-south");
    }
}
