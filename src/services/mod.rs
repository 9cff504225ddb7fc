pub mod catalog;
pub mod trip_planner;
