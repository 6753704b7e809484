//! Great-circle distance/bearing on a spherical Earth and a local flat-earth
//! offset for short hops around an observer.

use crate::angles::{deg_to_rad, normalize_angle, rad_to_deg};
use crate::types::GeoPoint;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Haversine distance in meters.
pub fn distance_meters(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = deg_to_rad(a.latitude);
    let lat2 = deg_to_rad(b.latitude);
    let dlat = lat2 - lat1;
    let dlon = deg_to_rad(b.longitude - a.longitude);
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_METERS * h.sqrt().min(1.0).asin()
}

/// Initial bearing from `a` towards `b`, degrees clockwise from North in [0, 360).
///
/// Identical points yield 0 through `atan2(0, 0)`.
pub fn bearing_degrees(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = deg_to_rad(a.latitude);
    let lat2 = deg_to_rad(b.latitude);
    let dlon = deg_to_rad(b.longitude - a.longitude);
    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    normalize_angle(rad_to_deg(y.atan2(x)))
}

/// Point `dx_meters` east and `dy_meters` north of `origin`.
///
/// Flat-earth approximation: only meant for offsets of tens of kilometers.
/// Longitude wraps into [-180, 180).
pub fn offset_to_point(origin: &GeoPoint, dx_meters: f64, dy_meters: f64) -> GeoPoint {
    let dlat = rad_to_deg(dy_meters / EARTH_RADIUS_METERS);
    let dlon = rad_to_deg(dx_meters / (EARTH_RADIUS_METERS * deg_to_rad(origin.latitude).cos()));
    GeoPoint {
        latitude: origin.latitude + dlat,
        longitude: wrap_longitude(origin.longitude + dlon),
    }
}

fn wrap_longitude(longitude: f64) -> f64 {
    if (-180.0..180.0).contains(&longitude) {
        longitude
    } else {
        normalize_angle(longitude + 180.0) - 180.0
    }
}
