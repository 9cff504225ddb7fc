use crate::error::{PlannerError, Result};
use crate::models::{DistanceMiles, DriveHours, StyleConfig, Waypoint};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a trip endpoint is named by the caller
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EndpointRef {
    Id(String),
    Name(String),
}

impl fmt::Display for EndpointRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointRef::Id(id) => write!(f, "{}", id),
            EndpointRef::Name(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripRequest {
    pub start: EndpointRef,
    pub end: EndpointRef,
    pub requested_days: u32,
    pub style: StyleConfig,
}

impl TripRequest {
    pub fn new(start: EndpointRef, end: EndpointRef, requested_days: u32, style: StyleConfig) -> Self {
        TripRequest {
            start,
            end,
            requested_days,
            style,
        }
    }

    /// Boundary checks run before any planning starts
    pub fn validate(&self) -> Result<()> {
        self.style.validate()?;
        if self.requested_days == 0 {
            return Err(PlannerError::InvalidRequest(
                "requested_days must be at least 1".to_string(),
            ));
        }
        if self.start == self.end {
            return Err(PlannerError::InvalidRequest(format!(
                "start and end must differ (both are '{}')",
                self.start
            )));
        }
        Ok(())
    }
}

/// One day of driving. Created once; replaced, never edited, when split.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailySegment {
    pub day_index: u32,
    pub start_waypoint: Waypoint,
    pub end_waypoint: Waypoint,
    pub distance_miles: DistanceMiles,
    pub drive_time_hours: DriveHours,
    pub is_compliant: bool,
    pub notes: Vec<String>,
}

impl DailySegment {
    pub fn new(
        day_index: u32,
        start_waypoint: Waypoint,
        end_waypoint: Waypoint,
        distance_miles: DistanceMiles,
        drive_time_hours: DriveHours,
        is_compliant: bool,
    ) -> Self {
        DailySegment {
            day_index,
            start_waypoint,
            end_waypoint,
            distance_miles,
            drive_time_hours,
            is_compliant,
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_day_index(mut self, day_index: u32) -> Self {
        self.day_index = day_index;
        self
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum WarningLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    CatalogValidation,
    MixedSequenceSources,
    SafetyCeiling,
    FeasibilityAdjustment,
    InsufficientCandidates,
    SequenceExhaustion,
    MinorTierRun,
    TierSubstitution,
    SegmentSplit,
    SegmentSplitFailure,
}

/// A structured diagnostic attached to a plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanWarning {
    pub level: WarningLevel,
    pub kind: WarningKind,
    pub message: String,
}

impl PlanWarning {
    pub fn warning(kind: WarningKind, message: impl Into<String>) -> Self {
        PlanWarning {
            level: WarningLevel::Warning,
            kind,
            message: message.into(),
        }
    }

    pub fn info(kind: WarningKind, message: impl Into<String>) -> Self {
        PlanWarning {
            level: WarningLevel::Info,
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.level {
            WarningLevel::Info => "info",
            WarningLevel::Warning => "warning",
        };
        write!(f, "[{}] {}", level, self.message)
    }
}

/// Final itinerary. Read-only once built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripPlan {
    pub segments: Vec<DailySegment>,
    pub total_days: u32,
    pub total_distance_miles: DistanceMiles,
    pub total_drive_time_hours: DriveHours,
    pub warnings: Vec<PlanWarning>,
}

impl TripPlan {
    /// Build the plan, deriving every total from the segments themselves
    pub fn from_segments(segments: Vec<DailySegment>, warnings: Vec<PlanWarning>) -> Self {
        let total_distance_miles = segments.iter().map(|s| s.distance_miles).sum();
        let total_drive_time_hours = segments.iter().map(|s| s.drive_time_hours).sum();

        TripPlan {
            total_days: segments.len() as u32,
            total_distance_miles,
            total_drive_time_hours,
            segments,
            warnings,
        }
    }

    pub fn non_compliant_days(&self) -> impl Iterator<Item = &DailySegment> {
        self.segments.iter().filter(|s| !s.is_compliant)
    }

    /// Ordered stops: the start of each day followed by the final end
    pub fn stops(&self) -> Vec<&Waypoint> {
        let mut stops: Vec<&Waypoint> = self.segments.iter().map(|s| &s.start_waypoint).collect();
        if let Some(last) = self.segments.last() {
            stops.push(&last.end_waypoint);
        }
        stops
    }
}

/// Run-level counters exposed alongside the plan
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlanDiagnostics {
    pub requested_days: u32,
    pub effective_days: u32,
    pub minimum_days: u32,
    pub rejected_catalog_entries: usize,
    pub sequence_rejected_candidates: usize,
    pub segments_split: usize,
    pub synthetic_waypoints_inserted: usize,
    pub warnings: Vec<PlanWarning>,
}

impl PlanDiagnostics {
    pub fn has_warning(&self, kind: WarningKind) -> bool {
        self.warnings.iter().any(|w| w.kind == kind)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanOutcome {
    pub plan: TripPlan,
    pub diagnostics: PlanDiagnostics,
}
