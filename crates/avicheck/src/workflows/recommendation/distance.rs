use crate::workflows::users::{Address, GeoPoint};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Assumed distance between two addresses in the same city without
/// coordinates.
pub const SAME_CITY_FALLBACK_KM: f64 = 7.5;
/// Assumed distance when the addresses cannot be compared.
pub const DEFAULT_FALLBACK_KM: f64 = 50.0;

/// Great-circle distance in kilometres.
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().min(1.0).asin();
    EARTH_RADIUS_KM * c
}

/// Distance between two optional addresses. Uses coordinates when both
/// sides have them, otherwise a deterministic city-based estimate.
pub fn between(origin: Option<&Address>, target: Option<&Address>) -> f64 {
    match (origin, target) {
        (Some(origin), Some(target)) => match (origin.coordinates, target.coordinates) {
            (Some(from), Some(to)) => haversine_km(from, to),
            _ if origin.same_city(target) => SAME_CITY_FALLBACK_KM,
            _ => DEFAULT_FALLBACK_KM,
        },
        _ => DEFAULT_FALLBACK_KM,
    }
}
