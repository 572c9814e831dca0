//! Great-circle distance between venues and users.

use crate::Coordinate;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculates the great-circle distance between two coordinates in kilometers.
///
/// Callers are expected to pass validated coordinates; a NaN component
/// propagates into the result.
///
/// # Example
/// ```
/// use dinefind_geo::{haversine_distance, Coordinate};
///
/// let beirut = Coordinate::new(33.8938, 35.5018);
/// let sidon = Coordinate::new(33.5634, 35.3711);
///
/// let distance = haversine_distance(&beirut, &sidon);
/// assert!(distance > 35.0 && distance < 42.0);
/// ```
#[inline]
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let half_d_lat = (lat2 - lat1) / 2.0;
    let half_d_lon = (lon2 - lon1) / 2.0;

    let a = half_d_lat.sin().powi(2) + lat1.cos() * lat2.cos() * half_d_lon.sin().powi(2);

    // Rounding can push `a` a hair above 1 for antipodal points.
    let c = 2.0 * a.sqrt().atan2((1.0 - a).max(0.0).sqrt());

    EARTH_RADIUS_KM * c
}
