pub mod coordinates;
pub mod distance;
pub mod style;
pub mod trip;
pub mod waypoint;

pub use coordinates::Coordinates;
pub use distance::{DistanceMiles, DriveHours};
pub use style::{EnforcementLevel, StyleConfig};
pub use trip::{
    DailySegment, EndpointRef, PlanDiagnostics, PlanOutcome, PlanWarning, TripPlan, TripRequest,
    WarningKind, WarningLevel,
};
pub use waypoint::{CatalogEntry, Waypoint, WaypointCategory};
