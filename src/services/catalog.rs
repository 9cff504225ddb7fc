use crate::error::{PlannerError, Result};
use crate::models::{CatalogEntry, EndpointRef, PlanWarning, WarningKind, Waypoint};
use std::collections::HashSet;

/// Validated waypoint catalog for a single planning invocation.
///
/// Raw entries are converted into typed [`Waypoint`]s once, here. Invalid and
/// duplicate entries are dropped and counted so downstream components can
/// assume well-formed data.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    waypoints: Vec<Waypoint>,
    rejected: usize,
}

impl Catalog {
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        let mut catalog = Catalog::default();
        let mut seen: HashSet<String> = HashSet::new();

        for entry in entries {
            match entry.into_waypoint() {
                Ok(waypoint) => catalog.admit(waypoint, &mut seen),
                Err(e) => {
                    tracing::debug!(error = %e, "Rejected catalog entry");
                    catalog.rejected += 1;
                }
            }
        }

        catalog.log_summary();
        catalog
    }

    /// Build from already-typed waypoints; synthetic stops and duplicate ids
    /// are still rejected
    pub fn from_waypoints(waypoints: Vec<Waypoint>) -> Self {
        let mut catalog = Catalog::default();
        let mut seen: HashSet<String> = HashSet::new();

        for waypoint in waypoints {
            if waypoint.is_synthetic()
                || waypoint.id.trim().is_empty()
                || Waypoint::is_reserved_id(&waypoint.id)
            {
                tracing::debug!(id = %waypoint.id, "Rejected catalog waypoint");
                catalog.rejected += 1;
                continue;
            }
            catalog.admit(waypoint, &mut seen);
        }

        catalog.log_summary();
        catalog
    }

    fn admit(&mut self, waypoint: Waypoint, seen: &mut HashSet<String>) {
        if seen.insert(waypoint.id.clone()) {
            self.waypoints.push(waypoint);
        } else {
            tracing::debug!(id = %waypoint.id, "Rejected duplicate catalog id");
            self.rejected += 1;
        }
    }

    fn log_summary(&self) {
        tracing::debug!(
            accepted = self.waypoints.len(),
            rejected = self.rejected,
            "Catalog validated: {} accepted, {} rejected",
            self.waypoints.len(),
            self.rejected
        );
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected
    }

    pub fn get(&self, id: &str) -> Option<&Waypoint> {
        self.waypoints.iter().find(|w| w.id == id)
    }

    /// Match an endpoint by exact id, or by case-insensitive name. A name of
    /// the form "City, ST" also matches on name plus state.
    pub fn resolve(&self, reference: &EndpointRef, role: &str) -> Result<&Waypoint> {
        let found = match reference {
            EndpointRef::Id(id) => self.get(id.trim()),
            EndpointRef::Name(name) => self.find_by_name(name),
        };

        found.ok_or_else(|| PlannerError::unresolvable(role, reference.to_string()))
    }

    fn find_by_name(&self, name: &str) -> Option<&Waypoint> {
        let wanted = name.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }

        if let Some(exact) = self
            .waypoints
            .iter()
            .find(|w| w.name.to_lowercase() == wanted)
        {
            return Some(exact);
        }

        let (city, state) = wanted.rsplit_once(',')?;
        let (city, state) = (city.trim(), state.trim());
        self.waypoints
            .iter()
            .find(|w| w.name.to_lowercase() == city && w.state.to_lowercase() == state)
    }

    /// Overnight-eligible candidates, excluding the given ids (the endpoints)
    pub fn eligible_destinations(&self, exclude: &[&str]) -> Vec<Waypoint> {
        self.waypoints
            .iter()
            .filter(|w| w.is_destination_city() && !exclude.contains(&w.id.as_str()))
            .cloned()
            .collect()
    }

    /// True when some entries carry explicit corridor positions and others
    /// would fall back to longitude-derived ones
    pub fn has_mixed_sequence_sources(&self) -> bool {
        let explicit = self
            .waypoints
            .iter()
            .filter(|w| w.sequence_position.is_some())
            .count();
        explicit > 0 && explicit < self.waypoints.len()
    }

    /// Diagnostics produced while validating the catalog
    pub fn warnings(&self) -> Vec<PlanWarning> {
        let mut warnings = Vec::new();

        if self.rejected > 0 {
            warnings.push(PlanWarning::warning(
                WarningKind::CatalogValidation,
                format!(
                    "{} catalog entries were rejected as invalid or duplicate",
                    self.rejected
                ),
            ));
        }

        if self.has_mixed_sequence_sources() {
            warnings.push(PlanWarning::warning(
                WarningKind::MixedSequenceSources,
                "Catalog mixes explicit sequence positions with longitude-derived ones; \
                 progression checks may be inconsistent",
            ));
        }

        warnings
    }
}
