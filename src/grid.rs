use log::trace;

use crate::error::{RainbowError, Result};
use crate::geo::offset_to_point;
use crate::types::GeoPoint;

/// Lattice index range `[-half, half]` covering a disc of `radius_meters`.
pub fn half_steps(radius_meters: f64, spacing_meters: f64) -> i64 {
    let steps = (2.0 * radius_meters / spacing_meters).ceil() as i64;
    steps / 2
}

/// Square lattice around `center`, cropped to a circle of `radius_meters`.
///
/// The crop uses the planar offset `hypot(dx, dy)`, not geodesic distance, so
/// the point set is exact and reproducible. Points come out row by row from
/// south to north, west to east within a row. Near a pole, lattice rows whose
/// offset latitude would pass beyond ±90° are dropped.
pub fn build_grid(
    center: &GeoPoint,
    radius_meters: f64,
    spacing_meters: f64,
) -> Result<Vec<GeoPoint>> {
    let positive = |v: f64| v.is_finite() && v > 0.0;
    if !positive(radius_meters) || !positive(spacing_meters) {
        return Err(RainbowError::InvalidGridConfig {
            radius_meters,
            spacing_meters,
        });
    }

    let half = half_steps(radius_meters, spacing_meters);
    let mut points = Vec::new();
    for iy in -half..=half {
        for ix in -half..=half {
            let dx = ix as f64 * spacing_meters;
            let dy = iy as f64 * spacing_meters;
            if dx.hypot(dy) > radius_meters {
                continue;
            }
            let point = offset_to_point(center, dx, dy);
            if (-90.0..=90.0).contains(&point.latitude) {
                points.push(point);
            }
        }
    }

    trace!(
        "built grid of {} points (half-width {}) around ({:.4}, {:.4})",
        points.len(),
        half,
        center.latitude,
        center.longitude
    );
    Ok(points)
}
