//! Static geography reference for the closed city set.
//!
//! Read-only lookup tables loaded at compile time; no lifecycle, no side
//! effects. Distances come from a fixed inter-city table and fall back to a
//! default for unmapped pairs rather than failing — the feature pipeline must
//! stay total.

/// Distance returned for any city pair absent from the table.
pub const DEFAULT_DISTANCE_KM: f64 = 1000.0;

/// Cities whose presence on either end of a route marks it as a major hub.
pub const MAJOR_HUBS: [&str; 2] = ["Delhi", "Mumbai"];

/// A known airport with approximate coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Airport {
    pub city: &'static str,
    pub code: &'static str,
    pub lat: f64,
    pub lon: f64,
}

/// Major Indian airports covered by the source dataset.
pub const AIRPORTS: [Airport; 6] = [
    Airport { city: "Delhi", code: "DEL", lat: 28.5665, lon: 77.1031 },
    Airport { city: "Mumbai", code: "BOM", lat: 19.0896, lon: 72.8656 },
    Airport { city: "Bangalore", code: "BLR", lat: 13.1986, lon: 77.7066 },
    Airport { city: "Kolkata", code: "CCU", lat: 22.6547, lon: 88.4467 },
    Airport { city: "Hyderabad", code: "HYD", lat: 17.2403, lon: 78.4294 },
    Airport { city: "Chennai", code: "MAA", lat: 12.9941, lon: 80.1709 },
];

/// Approximate inter-city distances (km), stored one direction per pair.
const DISTANCES_KM: [(&str, &str, f64); 15] = [
    ("Delhi", "Mumbai", 1148.0),
    ("Delhi", "Bangalore", 1740.0),
    ("Delhi", "Kolkata", 1305.0),
    ("Delhi", "Hyderabad", 1255.0),
    ("Delhi", "Chennai", 1760.0),
    ("Mumbai", "Bangalore", 842.0),
    ("Mumbai", "Kolkata", 1663.0),
    ("Mumbai", "Hyderabad", 617.0),
    ("Mumbai", "Chennai", 1025.0),
    ("Bangalore", "Kolkata", 1559.0),
    ("Bangalore", "Hyderabad", 499.0),
    ("Bangalore", "Chennai", 290.0),
    ("Kolkata", "Hyderabad", 1192.0),
    ("Kolkata", "Chennai", 1361.0),
    ("Hyderabad", "Chennai", 520.0),
];

/// Look up the distance between two cities.
///
/// Symmetric: the stored direction does not matter. Unmapped pairs return
/// [`DEFAULT_DISTANCE_KM`].
pub fn distance_km(a: &str, b: &str) -> f64 {
    for &(x, y, d) in &DISTANCES_KM {
        if (x == a && y == b) || (x == b && y == a) {
            return d;
        }
    }
    DEFAULT_DISTANCE_KM
}

/// Look up a known airport by city name.
pub fn airport(city: &str) -> Option<&'static Airport> {
    AIRPORTS.iter().find(|a| a.city == city)
}

/// Whether either endpoint of a route is a major hub.
pub fn is_major_hub_route(source: &str, destination: &str) -> bool {
    MAJOR_HUBS.contains(&source) || MAJOR_HUBS.contains(&destination)
}

/// Great-circle distance between two airports (km).
pub fn haversine_km(a: &Airport, b: &Airport) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;

    let (lat1, lon1) = (a.lat.to_radians(), a.lon.to_radians());
    let (lat2, lon2) = (b.lat.to_radians(), b.lon.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}
