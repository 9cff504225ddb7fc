use crate::config::{PlannerConfig, ScoringStrategy};
use crate::constants::MIN_TARGET_INCREMENT_FRACTION;
use crate::models::{PlanWarning, WarningKind, Waypoint};
use std::collections::HashSet;

use super::distance_cache::DistanceCache;
use super::scoring_strategy::{
    rank, DestinationScoringStrategy, ScoredCandidate, ScoringContext, SimpleStrategy,
    WeightedStrategy,
};
use super::sequence::SequenceOracle;

/// Intermediate stops chosen for a trip, in travel order
#[derive(Debug, Clone, Default)]
pub struct SelectionOutcome {
    pub selected: Vec<Waypoint>,
    /// Distinct candidates rejected at least once for breaking progression
    pub sequence_rejected: usize,
    pub warnings: Vec<PlanWarning>,
}

/// Greedy, single-pass, left-to-right choice of overnight stops.
///
/// Each step targets an even share of the corridor, keeps only candidates
/// that progress toward the destination and respect minimum spacing, and
/// takes the best-scoring one. No backtracking search; identical inputs
/// always produce the identical list.
pub struct DestinationSelector {
    config: PlannerConfig,
    scoring_strategy: Box<dyn DestinationScoringStrategy>,
}

impl DestinationSelector {
    pub fn new(config: PlannerConfig) -> Self {
        let scoring_strategy: Box<dyn DestinationScoringStrategy> = match config.scoring_strategy {
            ScoringStrategy::Simple => {
                tracing::debug!("Using Simple destination scoring (distance match only)");
                Box::new(SimpleStrategy)
            }
            ScoringStrategy::Weighted => {
                tracing::debug!("Using Weighted destination scoring (distance match + priority)");
                Box::new(WeightedStrategy::new(&config))
            }
        };

        Self {
            config,
            scoring_strategy,
        }
    }

    /// Pick `effective_days - 1` stops from `candidates` (already filtered to
    /// destination cities, endpoints excluded). Returns fewer, with a warning,
    /// when the catalog runs out.
    pub fn select(
        &self,
        start: &Waypoint,
        end: &Waypoint,
        candidates: &[Waypoint],
        effective_days: u32,
        oracle: &SequenceOracle,
        distances: &DistanceCache,
    ) -> SelectionOutcome {
        let needed = effective_days.saturating_sub(1) as usize;
        let mut outcome = SelectionOutcome::default();
        if needed == 0 {
            return outcome;
        }

        if candidates.len() < needed {
            tracing::warn!(
                available = candidates.len(),
                needed,
                "Only {} eligible destinations for {} overnight stops",
                candidates.len(),
                needed
            );
            outcome.warnings.push(PlanWarning::warning(
                WarningKind::InsufficientCandidates,
                format!(
                    "Only {} eligible destination cities for the {} overnight stops a {}-day \
                     trip needs; the plan may have fewer days than requested",
                    candidates.len(),
                    needed,
                    effective_days
                ),
            ));
        }

        let total_miles = distances.between(start, end);
        let per_day_miles = total_miles / effective_days as f64;
        let mut used: HashSet<&str> = HashSet::new();
        let mut sequence_rejected: HashSet<&str> = HashSet::new();

        for step in 1..=needed {
            let anchor = outcome.selected.last().unwrap_or(start);
            let progress_miles = distances.between(start, anchor);
            let target_increment_miles = (total_miles * step as f64 / effective_days as f64
                - progress_miles)
                .max(per_day_miles * MIN_TARGET_INCREMENT_FRACTION);

            let mut valid: Vec<&Waypoint> = Vec::new();
            for candidate in candidates {
                if used.contains(candidate.id.as_str()) {
                    continue;
                }
                if !oracle.is_forward_progression(anchor, candidate, end) {
                    sequence_rejected.insert(candidate.id.as_str());
                    continue;
                }
                if self.violates_spacing(candidate, start, end, &outcome.selected, distances) {
                    continue;
                }
                valid.push(candidate);
            }

            if valid.is_empty() {
                tracing::warn!(
                    step,
                    anchor = %anchor.name,
                    "No forward-progressing candidate after {}",
                    anchor.name
                );
                outcome.warnings.push(PlanWarning::warning(
                    WarningKind::SequenceExhaustion,
                    format!(
                        "No forward-progressing destination found after {} for stop {} of {}; \
                         selected {} of {} overnight stops",
                        anchor.name,
                        step,
                        needed,
                        outcome.selected.len(),
                        needed
                    ),
                ));
                break;
            }

            let context = ScoringContext {
                anchor,
                target_increment_miles,
                distances,
            };
            let mut scored = self.scoring_strategy.score_candidates(&valid, &context);
            rank(&mut scored);

            let Some(best) = scored.first() else {
                break;
            };
            let choice =
                self.apply_tier_rule(best, &scored, &outcome.selected, &mut outcome.warnings);

            tracing::debug!(
                step,
                chosen = %choice.waypoint.name,
                score = %format!("{:.3}", choice.score),
                distance_error = %format!("{:.3}", choice.distance_error),
                target_miles = %format!("{:.1}", target_increment_miles),
                valid = valid.len(),
                "Selected stop {}: {}",
                step,
                choice.waypoint.name
            );

            used.insert(choice.waypoint.id.as_str());
            outcome.selected.push(choice.waypoint.clone());
        }

        outcome.sequence_rejected = sequence_rejected.len();
        outcome
    }

    /// Minimum spacing against both endpoints and every stop already chosen
    fn violates_spacing(
        &self,
        candidate: &Waypoint,
        start: &Waypoint,
        end: &Waypoint,
        selected: &[Waypoint],
        distances: &DistanceCache,
    ) -> bool {
        let min = self.config.min_spacing_miles;
        std::iter::once(start)
            .chain(std::iter::once(end))
            .chain(selected.iter())
            .any(|other| distances.between(candidate, other) < min)
    }

    fn is_minor(&self, waypoint: &Waypoint) -> bool {
        waypoint.priority_score() < self.config.minor_tier_priority_threshold
    }

    /// Avoid three minor-tier stops in a row: swap in a higher-tier candidate
    /// whose distance match is within tolerance, or record the run.
    fn apply_tier_rule<'a>(
        &self,
        best: &ScoredCandidate<'a>,
        ranked: &[ScoredCandidate<'a>],
        selected: &[Waypoint],
        warnings: &mut Vec<PlanWarning>,
    ) -> ScoredCandidate<'a> {
        let previous_two_minor =
            selected.len() >= 2 && selected[selected.len() - 2..].iter().all(|w| self.is_minor(w));
        if !previous_two_minor || !self.is_minor(best.waypoint) {
            return *best;
        }

        let substitute = ranked.iter().find(|c| {
            !self.is_minor(c.waypoint)
                && c.distance_error <= best.distance_error + self.config.tier_substitution_tolerance
        });

        match substitute {
            Some(alternative) => {
                warnings.push(PlanWarning::info(
                    WarningKind::TierSubstitution,
                    format!(
                        "Chose {} over {} to avoid three minor stops in a row",
                        alternative.waypoint.name, best.waypoint.name
                    ),
                ));
                *alternative
            }
            None => {
                let run: Vec<&str> = selected[selected.len() - 2..]
                    .iter()
                    .map(|w| w.name.as_str())
                    .chain(std::iter::once(best.waypoint.name.as_str()))
                    .collect();
                warnings.push(PlanWarning::warning(
                    WarningKind::MinorTierRun,
                    format!(
                        "Three consecutive minor stops with no higher-tier alternative: {}",
                        run.join(", ")
                    ),
                ));
                *best
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, WaypointCategory};

    fn city(id: &str, lat: f64, lng: f64, priority: f64) -> Waypoint {
        Waypoint::new(
            id,
            id,
            Coordinates::new(lat, lng).unwrap(),
            WaypointCategory::DestinationCity,
            "XX",
        )
        .with_priority(priority)
    }

    /// Evenly spaced cities along latitude 35, every half degree of longitude
    fn corridor(from_lng: f64, to_lng: f64, priority: f64) -> Vec<Waypoint> {
        let mut cities = Vec::new();
        let mut lng = from_lng;
        while lng > to_lng {
            cities.push(city(&format!("c{:.1}", lng), 35.0, lng, priority));
            lng -= 0.5;
        }
        cities
    }

    fn selector(config: PlannerConfig) -> DestinationSelector {
        DestinationSelector::new(config)
    }

    #[test]
    fn test_selects_requested_count_in_order() {
        let start = city("start", 35.0, -95.0, 10.0);
        let end = city("end", 35.0, -110.0, 10.0);
        let candidates = corridor(-95.5, -109.6, 5.0);

        let outcome = selector(PlannerConfig::default()).select(
            &start,
            &end,
            &candidates,
            4,
            &SequenceOracle::new(2.0),
            &DistanceCache::new(),
        );

        assert_eq!(outcome.selected.len(), 3);
        let lngs: Vec<f64> = outcome.selected.iter().map(|w| w.coordinates.lng).collect();
        assert!(lngs.windows(2).all(|w| w[1] < w[0]), "not westbound: {lngs:?}");
        // Roughly quarter points of the 15-degree corridor
        assert!((lngs[0] + 98.75).abs() <= 0.5);
        assert!((lngs[1] + 102.5).abs() <= 0.5);
        assert!((lngs[2] + 106.25).abs() <= 0.5);
    }

    #[test]
    fn test_single_day_selects_nothing() {
        let start = city("start", 35.0, -95.0, 10.0);
        let end = city("end", 35.0, -100.0, 10.0);
        let outcome = selector(PlannerConfig::default()).select(
            &start,
            &end,
            &corridor(-95.5, -99.6, 5.0),
            1,
            &SequenceOracle::new(2.0),
            &DistanceCache::new(),
        );
        assert!(outcome.selected.is_empty());
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_rejects_backtracking_candidates() {
        let start = city("start", 35.0, -95.0, 10.0);
        let end = city("end", 35.0, -105.0, 10.0);
        let candidates = vec![
            city("behind", 35.0, -92.0, 10.0),
            city("ahead", 35.0, -100.0, 0.0),
        ];

        let outcome = selector(PlannerConfig::default()).select(
            &start,
            &end,
            &candidates,
            2,
            &SequenceOracle::new(2.0),
            &DistanceCache::new(),
        );

        assert_eq!(outcome.selected.len(), 1);
        assert_eq!(outcome.selected[0].id, "ahead");
        assert_eq!(outcome.sequence_rejected, 1);
    }

    #[test]
    fn test_sequence_exhaustion_stops_early() {
        let start = city("start", 35.0, -95.0, 10.0);
        let end = city("end", 35.0, -105.0, 10.0);
        let candidates = vec![city("only", 35.0, -100.0, 5.0)];

        let outcome = selector(PlannerConfig::default()).select(
            &start,
            &end,
            &candidates,
            4,
            &SequenceOracle::new(2.0),
            &DistanceCache::new(),
        );

        assert_eq!(outcome.selected.len(), 1);
        let kinds: Vec<WarningKind> = outcome.warnings.iter().map(|w| w.kind).collect();
        assert!(kinds.contains(&WarningKind::InsufficientCandidates));
        assert!(kinds.contains(&WarningKind::SequenceExhaustion));
    }

    #[test]
    fn test_min_spacing_excludes_crowded_candidates() {
        let start = city("start", 35.0, -95.0, 10.0);
        let end = city("end", 35.0, -100.0, 10.0);
        // ~17 miles from the start
        let candidates = vec![city("too-close", 35.0, -95.3, 10.0)];

        let outcome = selector(PlannerConfig::default()).select(
            &start,
            &end,
            &candidates,
            2,
            &SequenceOracle::new(2.0),
            &DistanceCache::new(),
        );

        assert!(outcome.selected.is_empty());
        assert!(outcome
            .warnings
            .iter()
            .any(|w| w.kind == WarningKind::SequenceExhaustion));
    }

    #[test]
    fn test_min_spacing_between_selected_stops() {
        let start = city("start", 35.0, -95.0, 10.0);
        let end = city("end", 35.0, -105.0, 10.0);
        // First third of the trip, then ~17 miles further west
        let candidates = vec![
            city("first", 35.0, -98.3, 5.0),
            city("crowded", 35.0, -98.6, 5.0),
        ];

        let outcome = selector(PlannerConfig::default()).select(
            &start,
            &end,
            &candidates,
            3,
            &SequenceOracle::new(2.0),
            &DistanceCache::new(),
        );

        let ids: Vec<&str> = outcome.selected.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["first"]);
        assert!(outcome
            .warnings
            .iter()
            .any(|w| w.kind == WarningKind::SequenceExhaustion));
    }

    #[test]
    fn test_three_minor_stops_trigger_substitution() {
        let start = city("start", 35.0, -95.0, 10.0);
        let end = city("end", 35.0, -115.0, 10.0);
        let mut candidates = corridor(-95.5, -114.6, 0.0);
        // A heritage stop just past the third quarter point
        candidates.push(city("heritage", 35.1, -110.2, 9.0));

        let outcome = selector(PlannerConfig {
            priority_bonus_weight: 0.0,
            ..PlannerConfig::default()
        })
        .select(
            &start,
            &end,
            &candidates,
            4,
            &SequenceOracle::new(2.0),
            &DistanceCache::new(),
        );

        assert_eq!(outcome.selected.len(), 3);
        assert_eq!(outcome.selected[2].id, "heritage");
        assert!(outcome
            .warnings
            .iter()
            .any(|w| w.kind == WarningKind::TierSubstitution));
    }

    #[test]
    fn test_three_minor_stops_without_alternative_warns() {
        let start = city("start", 35.0, -95.0, 10.0);
        let end = city("end", 35.0, -115.0, 10.0);
        let candidates = corridor(-95.5, -114.6, 0.0);

        let outcome = selector(PlannerConfig::default()).select(
            &start,
            &end,
            &candidates,
            4,
            &SequenceOracle::new(2.0),
            &DistanceCache::new(),
        );

        assert_eq!(outcome.selected.len(), 3);
        assert!(outcome
            .warnings
            .iter()
            .any(|w| w.kind == WarningKind::MinorTierRun));
    }

    #[test]
    fn test_selection_is_deterministic() {
        let start = city("start", 35.0, -95.0, 10.0);
        let end = city("end", 35.0, -115.0, 10.0);
        let candidates = corridor(-95.5, -114.6, 4.0);
        let select = || {
            selector(PlannerConfig::default())
                .select(
                    &start,
                    &end,
                    &candidates,
                    6,
                    &SequenceOracle::new(2.0),
                    &DistanceCache::new(),
                )
                .selected
                .into_iter()
                .map(|w| w.id)
                .collect::<Vec<_>>()
        };

        assert_eq!(select(), select());
    }
}
