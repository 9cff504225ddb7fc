use roadtrip_planner::evaluation::route_66_catalog;
use roadtrip_planner::models::{
    Coordinates, DailySegment, EndpointRef, StyleConfig, TripRequest, Waypoint, WaypointCategory,
};
use roadtrip_planner::Catalog;

/// Built-in Route 66 corridor catalog
#[allow(dead_code)]
pub fn corridor() -> Catalog {
    route_66_catalog()
}

/// Create a test destination city
#[allow(dead_code)]
pub fn create_test_city(id: &str, name: &str, lat: f64, lng: f64, state: &str) -> Waypoint {
    Waypoint::new(
        id,
        name,
        Coordinates::new(lat, lng).unwrap(),
        WaypointCategory::DestinationCity,
        state,
    )
}

/// Two cities on latitude 35, about 700 miles apart, with nothing between
#[allow(dead_code)]
pub fn far_apart_catalog() -> Catalog {
    Catalog::from_waypoints(vec![
        create_test_city("east", "East End", 35.0, -95.0, "OK"),
        create_test_city("west", "West End", 35.0, -107.4, "NM"),
    ])
}

#[allow(dead_code)]
pub fn request_by_id(start: &str, end: &str, days: u32, style: StyleConfig) -> TripRequest {
    TripRequest::new(
        EndpointRef::Id(start.to_string()),
        EndpointRef::Id(end.to_string()),
        days,
        style,
    )
}

#[allow(dead_code)]
pub fn assert_contiguous(segments: &[DailySegment]) {
    for pair in segments.windows(2) {
        assert_eq!(
            pair[0].end_waypoint.id, pair[1].start_waypoint.id,
            "day {} ends at {} but day {} starts at {}",
            pair[0].day_index, pair[0].end_waypoint.id, pair[1].day_index, pair[1].start_waypoint.id
        );
    }
}
