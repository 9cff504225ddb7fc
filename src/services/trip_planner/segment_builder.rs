use super::distance_cache::DistanceCache;
use super::drive_time::DriveTimeModel;
use crate::models::{DailySegment, DistanceMiles, Waypoint};

/// Turns an ordered stop list into draft daily segments
pub struct SegmentBuilder<'a> {
    distances: &'a DistanceCache,
    limit_hours: f64,
}

impl<'a> SegmentBuilder<'a> {
    pub fn new(distances: &'a DistanceCache, limit_hours: f64) -> Self {
        Self {
            distances,
            limit_hours,
        }
    }

    /// Measure a single leg. Compliance here reflects only the drive-time
    /// limit; the enforcer has the final word.
    pub fn segment(&self, day_index: u32, from: &Waypoint, to: &Waypoint) -> DailySegment {
        let miles = self.distances.between(from, to);
        let drive_time = DriveTimeModel::estimate(miles);

        DailySegment::new(
            day_index,
            from.clone(),
            to.clone(),
            DistanceMiles(miles),
            drive_time,
            !drive_time.exceeds(self.limit_hours),
        )
    }

    /// Pair consecutive stops of `[start, ...selected, end]`, days numbered from 1
    pub fn build(&self, start: &Waypoint, selected: &[Waypoint], end: &Waypoint) -> Vec<DailySegment> {
        let stops: Vec<&Waypoint> = std::iter::once(start)
            .chain(selected.iter())
            .chain(std::iter::once(end))
            .collect();

        stops
            .windows(2)
            .enumerate()
            .map(|(i, pair)| self.segment(i as u32 + 1, pair[0], pair[1]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, WaypointCategory};

    fn city(id: &str, lat: f64, lng: f64) -> Waypoint {
        Waypoint::new(
            id,
            id,
            Coordinates::new(lat, lng).unwrap(),
            WaypointCategory::DestinationCity,
            "XX",
        )
    }

    #[test]
    fn test_build_pairs_consecutive_stops() {
        let cache = DistanceCache::new();
        let builder = SegmentBuilder::new(&cache, 6.0);
        let chicago = city("chicago", 41.8781, -87.6298);
        let springfield = city("springfield", 39.7817, -89.6501);
        let st_louis = city("st-louis", 38.6270, -90.1994);

        let segments = builder.build(&chicago, &[springfield.clone()], &st_louis);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].day_index, 1);
        assert_eq!(segments[1].day_index, 2);
        assert_eq!(segments[0].start_waypoint.id, "chicago");
        assert_eq!(segments[0].end_waypoint.id, "springfield");
        assert_eq!(segments[1].start_waypoint.id, "springfield");
        assert_eq!(segments[1].end_waypoint.id, "st-louis");
        assert!(segments.iter().all(|s| s.is_compliant && s.notes.is_empty()));
        assert_eq!(
            segments[0].distance_miles.as_miles(),
            chicago.distance_to(&springfield)
        );
    }

    #[test]
    fn test_segment_flags_over_limit_draft() {
        let cache = DistanceCache::new();
        let builder = SegmentBuilder::new(&cache, 6.0);
        let chicago = city("chicago", 41.8781, -87.6298);
        let amarillo = city("amarillo", 35.2220, -101.8313);

        let segment = builder.segment(1, &chicago, &amarillo);
        assert!(!segment.is_compliant);
        assert_eq!(segment.drive_time_hours.as_hours(), 10.0);
    }
}
