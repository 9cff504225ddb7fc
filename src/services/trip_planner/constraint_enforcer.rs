use super::distance_cache::DistanceCache;
use super::drive_time::DriveTimeModel;
use super::segment_builder::SegmentBuilder;
use super::sequence::SequenceOracle;
use crate::config::PlannerConfig;
use crate::constants::{ABSOLUTE_SAFETY_CEILING_HOURS, HARD_CAP_DISTANCE_MILES};
use crate::models::{
    DailySegment, DistanceMiles, DriveHours, PlanWarning, StyleConfig, WarningKind, Waypoint,
};
use std::collections::HashSet;

/// Repaired segments plus what it took to get there
#[derive(Debug, Clone, Default)]
pub struct EnforcementOutcome {
    pub segments: Vec<DailySegment>,
    /// Original segments replaced by two or more days
    pub segments_split: usize,
    pub synthetic_inserted: usize,
    pub warnings: Vec<PlanWarning>,
}

/// Per-original-segment repair bookkeeping
struct RepairState {
    day_index: u32,
    budget: usize,
    next_ordinal: usize,
    pieces: Vec<DailySegment>,
    synthetic: usize,
}

/// Brings every day within the style's drive-time limit.
///
/// Over-long days are split at a real destination lying along the way when
/// one exists, otherwise at evenly interpolated drive-break points. Each
/// original day gets a split budget of ceil(distance / max safe distance)
/// plus configured slack; anything still over the limit when the budget runs
/// out is capped at the safety ceiling and flagged non-compliant.
pub struct ConstraintEnforcer<'a> {
    config: &'a PlannerConfig,
    oracle: &'a SequenceOracle,
    distances: &'a DistanceCache,
    builder: SegmentBuilder<'a>,
    limit_hours: f64,
    max_safe_miles: f64,
}

impl<'a> ConstraintEnforcer<'a> {
    pub fn new(
        config: &'a PlannerConfig,
        style: &'a StyleConfig,
        oracle: &'a SequenceOracle,
        distances: &'a DistanceCache,
    ) -> Self {
        let limit_hours = style.effective_limit_hours();
        Self {
            config,
            oracle,
            distances,
            builder: SegmentBuilder::new(distances, limit_hours),
            limit_hours,
            max_safe_miles: DriveTimeModel::max_distance_within(limit_hours),
        }
    }

    /// A segment at or past the hard-cap distance only has an approximate
    /// drive time, so it is split even when the capped figure fits the limit
    pub fn needs_split(&self, segment: &DailySegment) -> bool {
        segment.drive_time_hours.exceeds(self.limit_hours)
            || segment.distance_miles.as_miles() >= HARD_CAP_DISTANCE_MILES
    }

    pub fn split_budget(&self, miles: f64) -> usize {
        let base = if self.max_safe_miles > 0.0 {
            (miles / self.max_safe_miles).ceil() as usize
        } else {
            0
        };
        base + self.config.split_budget_slack
    }

    /// Validate and repair drafts. `candidates` are the eligible destination
    /// cities; `used` holds ids already on the itinerary.
    pub fn enforce(
        &self,
        drafts: Vec<DailySegment>,
        candidates: &[Waypoint],
        mut used: HashSet<String>,
    ) -> EnforcementOutcome {
        let mut outcome = EnforcementOutcome::default();

        for draft in drafts {
            if !self.needs_split(&draft) {
                outcome.segments.push(draft);
                continue;
            }

            tracing::debug!(
                day = draft.day_index,
                from = %draft.start_waypoint.name,
                to = %draft.end_waypoint.name,
                miles = %format!("{:.1}", draft.distance_miles.as_miles()),
                hours = %format!("{:.2}", draft.drive_time_hours.as_hours()),
                limit = self.limit_hours,
                "Day {} exceeds {:.1}h limit, attempting split",
                draft.day_index,
                self.limit_hours
            );

            let mut state = RepairState {
                day_index: draft.day_index,
                budget: self.split_budget(draft.distance_miles.as_miles()),
                next_ordinal: 1,
                pieces: Vec::new(),
                synthetic: 0,
            };
            self.repair(
                &draft.start_waypoint,
                &draft.end_waypoint,
                &mut state,
                candidates,
                &mut used,
            );

            if state.pieces.len() > 1 {
                outcome.segments_split += 1;
                let via: Vec<&str> = state.pieces[1..]
                    .iter()
                    .map(|s| s.start_waypoint.name.as_str())
                    .collect();
                outcome.warnings.push(PlanWarning::info(
                    WarningKind::SegmentSplit,
                    format!(
                        "Day {} ({} to {}, {:.0} miles) exceeded the {:.1}h limit and was split \
                         into {} days via {}",
                        draft.day_index,
                        draft.start_waypoint.name,
                        draft.end_waypoint.name,
                        draft.distance_miles.as_miles(),
                        self.limit_hours,
                        state.pieces.len(),
                        via.join(", ")
                    ),
                ));
            }

            for piece in state.pieces.iter().filter(|s| !s.is_compliant) {
                tracing::warn!(
                    day = draft.day_index,
                    from = %piece.start_waypoint.name,
                    to = %piece.end_waypoint.name,
                    "Could not bring leg under {:.1}h limit",
                    self.limit_hours
                );
                outcome.warnings.push(PlanWarning::warning(
                    WarningKind::SegmentSplitFailure,
                    format!(
                        "{} to {} ({:.0} miles) could not be brought within the {:.1}h daily \
                         limit; reported as {:.1}h and flagged",
                        piece.start_waypoint.name,
                        piece.end_waypoint.name,
                        piece.distance_miles.as_miles(),
                        self.limit_hours,
                        piece.drive_time_hours.as_hours()
                    ),
                ));
            }

            outcome.synthetic_inserted += state.synthetic;
            outcome.segments.extend(state.pieces);
        }

        outcome
    }

    fn repair(
        &self,
        from: &Waypoint,
        to: &Waypoint,
        state: &mut RepairState,
        candidates: &[Waypoint],
        used: &mut HashSet<String>,
    ) {
        let segment = self.builder.segment(state.day_index, from, to);
        if !self.needs_split(&segment) {
            state.pieces.push(segment);
            return;
        }

        if state.budget == 0 {
            state
                .pieces
                .push(self.flag(segment, "the split budget for this day was exhausted"));
            return;
        }
        state.budget -= 1;

        if let Some(via) = self.find_balanced_split(from, to, candidates, used) {
            used.insert(via.id.clone());
            self.repair(from, via, state, candidates, used);
            self.repair(via, to, state, candidates, used);
            return;
        }

        if let Some(via) = self.find_progress_split(from, to, candidates, used) {
            used.insert(via.id.clone());
            state.pieces.push(self.builder.segment(state.day_index, from, via));
            self.repair(via, to, state, candidates, used);
            return;
        }

        if self.max_safe_miles > 0.0 {
            self.interpolate(from, to, segment.distance_miles.as_miles(), state);
            return;
        }

        state.pieces.push(self.flag(
            segment,
            "the daily limit is shorter than the minimum drive time",
        ));
    }

    fn is_usable(
        &self,
        candidate: &Waypoint,
        from: &Waypoint,
        to: &Waypoint,
        used: &HashSet<String>,
    ) -> bool {
        candidate.id != from.id
            && candidate.id != to.id
            && !used.contains(&candidate.id)
            && self.oracle.is_forward_progression(from, candidate, to)
    }

    fn within_deviation(&self, direct: f64, first: f64, second: f64) -> bool {
        first + second <= direct * (1.0 + self.config.max_route_deviation_pct)
    }

    fn leg_is_safe(&self, miles: f64) -> bool {
        miles < HARD_CAP_DISTANCE_MILES && !DriveTimeModel::estimate(miles).exceeds(self.limit_hours)
    }

    /// A real stop splitting the day into two compliant halves, preferring
    /// the one that minimizes the longer half
    fn find_balanced_split<'c>(
        &self,
        from: &Waypoint,
        to: &Waypoint,
        candidates: &'c [Waypoint],
        used: &HashSet<String>,
    ) -> Option<&'c Waypoint> {
        let direct = self.distances.between(from, to);

        candidates
            .iter()
            .filter(|c| self.is_usable(c, from, to, used))
            .filter_map(|c| {
                let first = self.distances.between(from, c);
                let second = self.distances.between(c, to);
                if !self.within_deviation(direct, first, second)
                    || !self.leg_is_safe(first)
                    || !self.leg_is_safe(second)
                {
                    return None;
                }
                let longer = DriveTimeModel::estimate(first)
                    .as_hours()
                    .max(DriveTimeModel::estimate(second).as_hours());
                Some((longer, c))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.id.cmp(&b.1.id)))
            .map(|(_, c)| c)
    }

    /// When no single stop can halve the day, the along-route stop reaching
    /// furthest within one compliant day
    fn find_progress_split<'c>(
        &self,
        from: &Waypoint,
        to: &Waypoint,
        candidates: &'c [Waypoint],
        used: &HashSet<String>,
    ) -> Option<&'c Waypoint> {
        let direct = self.distances.between(from, to);

        candidates
            .iter()
            .filter(|c| self.is_usable(c, from, to, used))
            .filter_map(|c| {
                let first = self.distances.between(from, c);
                let remaining = self.distances.between(c, to);
                if remaining >= direct
                    || !self.within_deviation(direct, first, remaining)
                    || !self.leg_is_safe(first)
                {
                    return None;
                }
                Some((remaining, c))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.id.cmp(&b.1.id)))
            .map(|(_, c)| c)
    }

    /// Insert evenly spaced drive-break stops on the straight line between
    /// `from` and `to`, as many as needed and the budget allows
    fn interpolate(&self, from: &Waypoint, to: &Waypoint, direct: f64, state: &mut RepairState) {
        // One iteration was already charged for reaching this point
        let max_stops = state.budget + 1;
        let min_pieces = ((direct / self.max_safe_miles).ceil() as usize).max(2);
        let max_pieces = max_stops + 1;

        let mut chosen: Option<Vec<Waypoint>> = None;
        for pieces in min_pieces.min(max_pieces)..=max_pieces {
            let stops = self.break_points(from, to, pieces, state);
            let all_safe = std::iter::once(from)
                .chain(stops.iter())
                .zip(stops.iter().chain(std::iter::once(to)))
                .all(|(a, b)| self.leg_is_safe(a.distance_to(b)));
            let last_try = pieces == max_pieces;
            if all_safe || last_try {
                chosen = Some(stops);
                break;
            }
        }

        let Some(stops) = chosen else {
            return;
        };

        state.budget = state.budget.saturating_sub(stops.len().saturating_sub(1));
        state.next_ordinal += stops.len();
        state.synthetic += stops.len();

        tracing::debug!(
            day = state.day_index,
            inserted = stops.len(),
            "Inserted {} drive-break stops between {} and {}",
            stops.len(),
            from.name,
            to.name
        );

        let legs: Vec<(&Waypoint, &Waypoint)> = std::iter::once(from)
            .chain(stops.iter())
            .zip(stops.iter().chain(std::iter::once(to)))
            .collect();
        for (a, b) in legs {
            let segment = self.builder.segment(state.day_index, a, b);
            let segment = if self.needs_split(&segment) {
                self.flag(segment, "drive-break splitting reached its iteration bound")
            } else {
                segment
            };
            state.pieces.push(segment);
        }
    }

    fn break_points(
        &self,
        from: &Waypoint,
        to: &Waypoint,
        pieces: usize,
        state: &RepairState,
    ) -> Vec<Waypoint> {
        let positions = from.sequence_position.zip(to.sequence_position);

        (1..pieces)
            .map(|i| {
                let t = i as f64 / pieces as f64;
                let coordinates = from.coordinates.interpolate(&to.coordinates, t);
                let state_code = if t <= 0.5 { &from.state } else { &to.state };
                let sequence_position = positions.map(|(a, b)| a + (b - a) * t);
                Waypoint::drive_break(
                    state.day_index,
                    state.next_ordinal + i - 1,
                    coordinates,
                    state_code.clone(),
                    sequence_position,
                )
            })
            .collect()
    }

    /// Replace an unrepairable segment with a capped, flagged copy
    fn flag(&self, segment: DailySegment, reason: &str) -> DailySegment {
        let miles = segment.distance_miles.as_miles();
        let hours = segment.drive_time_hours.as_hours();
        let capped = hours.min(ABSOLUTE_SAFETY_CEILING_HOURS);

        let note = if miles >= HARD_CAP_DISTANCE_MILES || hours >= ABSOLUTE_SAFETY_CEILING_HOURS {
            format!(
                "Drive time capped at the {:.1}h safety ceiling for {:.0} miles because {}. \
                 Add trip days or adjust the itinerary manually.",
                ABSOLUTE_SAFETY_CEILING_HOURS, miles, reason
            )
        } else {
            format!(
                "Estimated {:.1}h exceeds the {:.1}h daily limit because {}. \
                 Add trip days or adjust the itinerary manually.",
                hours, self.limit_hours, reason
            )
        };

        DailySegment::new(
            segment.day_index,
            segment.start_waypoint,
            segment.end_waypoint,
            DistanceMiles(miles),
            DriveHours(capped),
            false,
        )
        .with_note(note)
    }
}
