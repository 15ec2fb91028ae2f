//! Distance model for geolocated points.
//!
//! Horizontal separation uses the haversine great-circle formula on a sphere of
//! radius [`EARTH_RADIUS_M`]. The graph edge weight folds the altitude
//! difference in as an orthogonal leg, which is a planar approximation that
//! holds for the short hops an operator connects by hand.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Latitude/longitude in degrees plus altitude in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl GeoPosition {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }

    /// Great-circle distance to another position, ignoring altitude.
    pub fn surface_distance_to(&self, other: &Self) -> f64 {
        surface_distance(self, other)
    }

    /// Combined 3D weight to another position.
    pub fn edge_weight_to(&self, other: &Self) -> f64 {
        edge_weight(self, other)
    }
}

/// Haversine distance in meters between the horizontal components of two
/// positions.
pub fn surface_distance(from: &GeoPosition, to: &GeoPosition) -> f64 {
    let phi1 = from.latitude.to_radians();
    let phi2 = to.latitude.to_radians();
    let dphi = (to.latitude - from.latitude).to_radians();
    let dlambda = (to.longitude - from.longitude).to_radians();

    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    // Rounding can push `a` a hair outside [0, 1]; sqrt(1 - a) would then be NaN.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

/// Absolute altitude difference in meters.
pub fn altitude_difference(from: &GeoPosition, to: &GeoPosition) -> f64 {
    (from.altitude - to.altitude).abs()
}

/// Edge weight used by the graph: hypotenuse of surface distance and altitude
/// difference.
pub fn edge_weight(from: &GeoPosition, to: &GeoPosition) -> f64 {
    let surface = surface_distance(from, to);
    let vertical = altitude_difference(from, to);
    surface.hypot(vertical)
}

/// Straight-line distance over the raw `(latitude, longitude, altitude)`
/// triple treated as Cartesian coordinates. Degrees and meters are mixed
/// without conversion.
pub fn raw_euclidean(from: &GeoPosition, to: &GeoPosition) -> f64 {
    let dx = to.latitude - from.latitude;
    let dy = to.longitude - from.longitude;
    let dz = to.altitude - from.altitude;
    (dx * dx + dy * dy + dz * dz).sqrt()
}
