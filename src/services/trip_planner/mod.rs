mod constraint_enforcer;
mod destination_selection;
mod distance_cache;
pub mod drive_time;
mod feasibility;
mod scoring_strategy;
mod segment_builder;
pub mod sequence;

use crate::config::PlannerConfig;
use crate::error::{PlannerError, Result};
use crate::models::{CatalogEntry, PlanDiagnostics, PlanOutcome, TripPlan, TripRequest};
use crate::services::catalog::Catalog;
use std::collections::HashSet;

use constraint_enforcer::ConstraintEnforcer;
use destination_selection::DestinationSelector;
use distance_cache::DistanceCache;
use feasibility::FeasibilityEstimator;
use segment_builder::SegmentBuilder;
use sequence::SequenceOracle;

pub use drive_time::DriveTimeModel;
pub use sequence::Direction;

/// Plans multi-day trips over a waypoint catalog.
///
/// Holds configuration only. Every call to [`TripPlanner::plan`] works on its
/// own distance memo and state, so a planner can be shared freely.
pub struct TripPlanner {
    config: PlannerConfig,
    selector: DestinationSelector,
    feasibility: FeasibilityEstimator,
}

impl TripPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        let selector = DestinationSelector::new(config.clone());
        let feasibility = FeasibilityEstimator::new(config.planning_speed_mph);

        TripPlanner {
            config,
            selector,
            feasibility,
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Produce a complete plan.
    ///
    /// Fails only on boundary problems: an invalid style or request, or an
    /// endpoint missing from the catalog. Everything else degrades into
    /// warnings on a returned plan.
    pub fn plan(&self, request: &TripRequest, catalog: &Catalog) -> Result<PlanOutcome> {
        request.validate()?;

        if catalog.is_empty() {
            return Err(PlannerError::InvalidRequest(
                "catalog has no valid waypoints".to_string(),
            ));
        }

        let start = catalog.resolve(&request.start, "start")?;
        let end = catalog.resolve(&request.end, "end")?;
        if start.id == end.id {
            return Err(PlannerError::InvalidRequest(format!(
                "start and end resolve to the same waypoint '{}'",
                start.id
            )));
        }

        let style = &request.style;
        tracing::info!(
            start = %start.name,
            end = %end.name,
            requested_days = request.requested_days,
            style = %style.style_name,
            max_hours = style.max_daily_drive_hours,
            enforcement = %style.enforcement_level,
            "Planning {} to {} over {} days",
            start.name,
            end.name,
            request.requested_days
        );

        let distances = DistanceCache::new();
        let oracle = SequenceOracle::new(
            self.config.sequence_tolerance * style.enforcement_level.tolerance_scale(),
        );

        let feasibility =
            self.feasibility
                .assess(start, end, style, request.requested_days);

        let candidates = catalog.eligible_destinations(&[start.id.as_str(), end.id.as_str()]);
        let selection = self.selector.select(
            start,
            end,
            &candidates,
            feasibility.effective_days,
            &oracle,
            &distances,
        );

        let drafts = SegmentBuilder::new(&distances, style.effective_limit_hours()).build(
            start,
            &selection.selected,
            end,
        );

        let used: HashSet<String> = std::iter::once(start)
            .chain(std::iter::once(end))
            .chain(selection.selected.iter())
            .map(|w| w.id.clone())
            .collect();
        let enforcement = ConstraintEnforcer::new(&self.config, style, &oracle, &distances)
            .enforce(drafts, &candidates, used);

        let mut warnings = catalog.warnings();
        warnings.extend(feasibility.warnings);
        warnings.extend(selection.warnings);
        warnings.extend(enforcement.warnings);

        let segments = enforcement
            .segments
            .into_iter()
            .enumerate()
            .map(|(i, segment)| segment.with_day_index(i as u32 + 1))
            .collect();
        let plan = TripPlan::from_segments(segments, warnings.clone());

        let (hits, misses) = distances.stats();
        tracing::info!(
            days = plan.total_days,
            total_miles = %format!("{:.1}", plan.total_distance_miles.as_miles()),
            total_hours = %format!("{:.2}", plan.total_drive_time_hours.as_hours()),
            non_compliant = plan.non_compliant_days().count(),
            segments_split = enforcement.segments_split,
            synthetic = enforcement.synthetic_inserted,
            warnings = warnings.len(),
            distance_cache_hits = hits,
            distance_cache_misses = misses,
            "Planned {} days from {} to {}",
            plan.total_days,
            start.name,
            end.name
        );

        let diagnostics = PlanDiagnostics {
            requested_days: request.requested_days,
            effective_days: feasibility.effective_days,
            minimum_days: feasibility.minimum_days,
            rejected_catalog_entries: catalog.rejected_count(),
            sequence_rejected_candidates: selection.sequence_rejected,
            segments_split: enforcement.segments_split,
            synthetic_waypoints_inserted: enforcement.synthetic_inserted,
            warnings,
        };

        Ok(PlanOutcome { plan, diagnostics })
    }

    /// Validate raw catalog entries, then plan
    pub fn plan_entries(
        &self,
        request: &TripRequest,
        entries: Vec<CatalogEntry>,
    ) -> Result<PlanOutcome> {
        let catalog = Catalog::from_entries(entries);
        self.plan(request, &catalog)
    }

    /// Plan and render the outcome as pretty-printed JSON
    pub fn plan_json(&self, request: &TripRequest, catalog: &Catalog) -> Result<String> {
        let outcome = self.plan(request, catalog)?;
        Ok(serde_json::to_string_pretty(&outcome)?)
    }
}

impl Default for TripPlanner {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}
