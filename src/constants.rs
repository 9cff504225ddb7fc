//! Stable planner-wide constants.
//!
//! Values here are structural invariants and model coefficients. They should
//! rarely change. For tuning knobs that benefit from experimentation, see
//! [`PlannerConfig`](crate::config::PlannerConfig) instead.

// --- Distance model ---

/// Mean Earth radius in miles used by the haversine formula.
pub const EARTH_RADIUS_MILES: f64 = 3_959.0;

// --- Drive-time model ---
// Each tier is (upper bound in miles, average speed in mph, buffer factor).
// A distance belongs to the first tier whose upper bound it is below.

/// Tiered speed/buffer curve for distances under [`HARD_CAP_DISTANCE_MILES`].
pub const DRIVE_TIME_TIERS: [(f64, f64, f64); 4] = [
    (50.0, 45.0, 1.20),
    (150.0, 55.0, 1.15),
    (300.0, 65.0, 1.10),
    (500.0, 70.0, 1.05),
];

/// Distances at or beyond this are reported at [`ABSOLUTE_SAFETY_CEILING_HOURS`].
pub const HARD_CAP_DISTANCE_MILES: f64 = 500.0;

/// No single day may report more drive time than this, whatever the style says.
pub const ABSOLUTE_SAFETY_CEILING_HOURS: f64 = 10.0;

/// Floor applied to every drive-time estimate.
pub const MIN_DRIVE_TIME_HOURS: f64 = 0.5;

// --- Sequence oracle ---
// Longitude-derived corridor position: (longitude + OFFSET) * SCALE.

/// Offset added to the longitude before scaling.
pub const LONGITUDE_POSITION_OFFSET: f64 = 100.0;
/// Scale applied to the offset longitude (0.1 degree per position unit).
pub const LONGITUDE_POSITION_SCALE: f64 = 10.0;

// --- Waypoint scoring ---

/// Upper bound of the heritage priority scale; priorities are clamped to 0..=MAX.
pub const MAX_PRIORITY: f64 = 10.0;

/// Floor on a selection step's target increment, as a fraction of the even
/// per-day share. Keeps the target positive after an anchor overshoots.
pub const MIN_TARGET_INCREMENT_FRACTION: f64 = 0.5;

// --- Constraint enforcement ---

/// Label stamped on interpolated stops inserted to split an over-long day.
pub const SYNTHETIC_STOP_LABEL: &str = "Drive Break Point";

/// Id prefix for interpolated stops.
pub const SYNTHETIC_STOP_ID_PREFIX: &str = "drive-break";

/// Precision (miles) of the binary search inverting the drive-time model.
pub const MAX_SAFE_DISTANCE_PRECISION_MILES: f64 = 0.01;

// --- Enforcement level tolerance scaling ---

/// Detour tolerance multiplier for strict styles.
pub const STRICT_TOLERANCE_SCALE: f64 = 0.5;
/// Detour tolerance multiplier for moderate styles.
pub const MODERATE_TOLERANCE_SCALE: f64 = 1.0;
/// Detour tolerance multiplier for flexible styles.
pub const FLEXIBLE_TOLERANCE_SCALE: f64 = 1.5;
