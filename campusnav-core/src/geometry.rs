//! Spherical-earth distance and bearing helpers

use geo::Point;

use crate::{EARTH_RADIUS_M, Meters};

/// Great-circle distance between two coordinates using the haversine formula
pub fn distance(lat_a: f64, lng_a: f64, lat_b: f64, lng_b: f64) -> Meters {
    let phi_a = lat_a.to_radians();
    let phi_b = lat_b.to_radians();
    let d_phi = (lat_b - lat_a).to_radians();
    let d_lambda = (lng_b - lng_a).to_radians();

    let sin_d_phi = (d_phi / 2.0).sin();
    let sin_d_lambda = (d_lambda / 2.0).sin();

    let h = sin_d_phi * sin_d_phi + phi_a.cos() * phi_b.cos() * sin_d_lambda * sin_d_lambda;
    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Initial bearing from A to B in degrees, normalized to `[0, 360)`
pub fn bearing(lat_a: f64, lng_a: f64, lat_b: f64, lng_b: f64) -> f64 {
    let phi_a = lat_a.to_radians();
    let phi_b = lat_b.to_radians();
    let d_lambda = (lng_b - lng_a).to_radians();

    let y = d_lambda.sin() * phi_b.cos();
    let x = phi_a.cos() * phi_b.sin() - phi_a.sin() * phi_b.cos() * d_lambda.cos();

    let degrees = y.atan2(x).to_degrees();
    let normalized = (degrees + 360.0) % 360.0;
    // -0.0 and values rounding up to 360.0
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// Distance between two `geo` points stored as (x = longitude, y = latitude)
pub fn point_distance(a: &Point<f64>, b: &Point<f64>) -> Meters {
    distance(a.y(), a.x(), b.y(), b.x())
}

/// Equirectangular projection around a fixed reference latitude.
///
/// Used to put coordinates into the spatial index in (approximately) meters,
/// so planar nearest-neighbour queries agree with great-circle distances over
/// campus-sized extents.
#[derive(Debug, Clone, Copy)]
pub struct LocalProjection {
    cos_ref: f64,
}

impl LocalProjection {
    pub fn new(reference_lat: f64) -> Self {
        let cos_ref = reference_lat.to_radians().cos();
        Self {
            cos_ref: if cos_ref.is_finite() { cos_ref } else { 1.0 },
        }
    }

    pub fn project(&self, lat: f64, lng: f64) -> [f64; 2] {
        [
            lng.to_radians() * self.cos_ref * EARTH_RADIUS_M,
            lat.to_radians() * EARTH_RADIUS_M,
        ]
    }
}

impl Default for LocalProjection {
    fn default() -> Self {
        Self::new(0.0)
    }
}
