// Library exports for testing and reusability

pub mod config;
pub mod constants;
pub mod error;
pub mod evaluation;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use config::{PlannerConfig, ScoringStrategy};
pub use error::{PlannerError, Result};
pub use services::catalog::Catalog;
pub use services::trip_planner::TripPlanner;
