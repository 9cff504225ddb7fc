use crate::evaluation::EvalScenario;
use crate::models::{CatalogEntry, EnforcementLevel, StyleConfig};
use crate::services::catalog::Catalog;

/// (id, name, lat, lng, state, priority)
type CorridorCity = (&'static str, &'static str, f64, f64, &'static str, f64);

/// Overnight-eligible cities along the historic Route 66 alignment, east to west
const ROUTE_66_CITIES: &[CorridorCity] = &[
    ("chicago", "Chicago", 41.8781, -87.6298, "IL", 10.0),
    ("joliet", "Joliet", 41.5250, -88.0817, "IL", 5.0),
    ("pontiac", "Pontiac", 40.8809, -88.6298, "IL", 6.0),
    ("bloomington", "Bloomington", 40.4842, -88.9937, "IL", 4.0),
    ("springfield-il", "Springfield", 39.7817, -89.6501, "IL", 8.0),
    ("st-louis", "St. Louis", 38.6270, -90.1994, "MO", 9.0),
    ("rolla", "Rolla", 37.9514, -91.7713, "MO", 4.0),
    ("springfield-mo", "Springfield", 37.2090, -93.2923, "MO", 7.0),
    ("joplin", "Joplin", 37.0842, -94.5133, "MO", 5.0),
    ("tulsa", "Tulsa", 36.1540, -95.9928, "OK", 8.0),
    ("oklahoma-city", "Oklahoma City", 35.4676, -97.5164, "OK", 8.0),
    ("elk-city", "Elk City", 35.4120, -99.4043, "OK", 4.0),
    ("amarillo", "Amarillo", 35.2220, -101.8313, "TX", 9.0),
    ("tucumcari", "Tucumcari", 35.1717, -103.7250, "NM", 6.0),
    ("santa-rosa", "Santa Rosa", 34.9387, -104.6825, "NM", 4.0),
    ("albuquerque", "Albuquerque", 35.0844, -106.6504, "NM", 8.0),
    ("gallup", "Gallup", 35.5281, -108.7426, "NM", 6.0),
    ("holbrook", "Holbrook", 34.9022, -110.1582, "AZ", 5.0),
    ("winslow", "Winslow", 35.0242, -110.6974, "AZ", 6.0),
    ("flagstaff", "Flagstaff", 35.1983, -111.6513, "AZ", 8.0),
    ("williams", "Williams", 35.2495, -112.1910, "AZ", 6.0),
    ("seligman", "Seligman", 35.3256, -112.8741, "AZ", 5.0),
    ("kingman", "Kingman", 35.1894, -114.0530, "AZ", 6.0),
    ("needles", "Needles", 34.8481, -114.6141, "CA", 3.0),
    ("barstow", "Barstow", 34.8958, -117.0173, "CA", 5.0),
    ("san-bernardino", "San Bernardino", 34.1083, -117.2898, "CA", 4.0),
    ("santa-monica", "Santa Monica", 34.0195, -118.4912, "CA", 10.0),
];

/// Roadside stops worth a detour; never chosen as overnight destinations
const ROUTE_66_ATTRACTIONS: &[CorridorCity] = &[
    ("meramec-caverns", "Meramec Caverns", 38.2056, -91.0935, "MO", 6.0),
    ("blue-whale", "Blue Whale of Catoosa", 36.1895, -95.7450, "OK", 5.0),
    ("cadillac-ranch", "Cadillac Ranch", 35.1872, -101.9871, "TX", 9.0),
    ("petrified-forest", "Petrified Forest", 34.9100, -109.8068, "AZ", 7.0),
];

fn entry(city: &CorridorCity, category: &str) -> CatalogEntry {
    let (id, name, latitude, longitude, state, priority) = *city;
    CatalogEntry {
        id: id.to_string(),
        name: name.to_string(),
        latitude,
        longitude,
        category: category.to_string(),
        state: state.to_string(),
        priority: Some(priority),
        sequence_position: None,
    }
}

/// Raw catalog entries for the Route 66 corridor
pub fn route_66_entries() -> Vec<CatalogEntry> {
    ROUTE_66_CITIES
        .iter()
        .map(|c| entry(c, "destination_city"))
        .chain(ROUTE_66_ATTRACTIONS.iter().map(|a| entry(a, "attraction")))
        .collect()
}

pub fn route_66_catalog() -> Catalog {
    Catalog::from_entries(route_66_entries())
}

fn scenario(name: &str, start: &str, end: &str, requested_days: u32, style: StyleConfig) -> EvalScenario {
    EvalScenario {
        name: name.to_string(),
        start: start.to_string(),
        end: end.to_string(),
        requested_days,
        style,
    }
}

/// Default evaluation scenarios covering each style and the awkward cases
pub fn default_scenarios() -> Vec<EvalScenario> {
    vec![
        // --- Single compliant day ---
        scenario(
            "chicago_st_louis_1d_leisurely",
            "chicago",
            "st-louis",
            1,
            StyleConfig::leisurely(),
        ),
        // --- Full corridor, each style ---
        scenario(
            "full_route_14d_leisurely",
            "chicago",
            "santa-monica",
            14,
            StyleConfig::leisurely(),
        ),
        scenario(
            "full_route_8d_destination_focused",
            "chicago",
            "santa-monica",
            8,
            StyleConfig::destination_focused(),
        ),
        scenario(
            "full_route_5d_road_warrior",
            "chicago",
            "santa-monica",
            5,
            StyleConfig::road_warrior(),
        ),
        // --- Infeasible request, day count raised ---
        scenario(
            "full_route_3d_leisurely_short",
            "chicago",
            "santa-monica",
            3,
            StyleConfig::leisurely(),
        ),
        // --- Eastbound ---
        scenario(
            "santa_monica_chicago_10d_destination_focused",
            "santa-monica",
            "chicago",
            10,
            StyleConfig::destination_focused(),
        ),
        // --- Mid-corridor legs ---
        scenario(
            "amarillo_flagstaff_3d_leisurely",
            "amarillo",
            "flagstaff",
            3,
            StyleConfig::leisurely(),
        ),
        scenario(
            "tulsa_albuquerque_2d_strict",
            "tulsa",
            "albuquerque",
            2,
            StyleConfig::new("strict_six", 6.0, EnforcementLevel::Strict),
        ),
        // --- Flexible enforcement, wider detour tolerance ---
        scenario(
            "oklahoma_city_kingman_2d_flexible",
            "oklahoma-city",
            "kingman",
            2,
            StyleConfig::new("loose_six", 6.0, EnforcementLevel::Flexible),
        ),
    ]
}
