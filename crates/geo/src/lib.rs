//! Geographic helpers for venue search.
//!
//! This crate provides:
//! - A [`Coordinate`] type with validity checks
//! - Haversine great-circle distance in kilometres
//! - Parsing of stored venue locations (GeoJSON points and WKT strings)
//!
//! # Example
//!
//! ```
//! use dinefind_geo::{haversine_distance, Coordinate};
//!
//! let beirut = Coordinate::new(33.8938, 35.5018);
//! let tripoli = Coordinate::new(34.4332, 35.8498);
//!
//! let km = haversine_distance(&beirut, &tripoli);
//! assert!((km - 68.0).abs() < 3.0);
//! ```

mod error;
mod haversine;
mod location;

pub use error::{GeoError, GeoErrorCode, Result};
pub use haversine::{haversine_distance, EARTH_RADIUS_KM};
pub use location::{parse_location, parse_wkt_point};

/// A geographic coordinate with latitude and longitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Returns true if both components are finite and within range.
    ///
    /// NaN and infinities fail every comparison below, so they are rejected
    /// along with out-of-range values.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Returns the coordinate if it is valid, `None` otherwise.
    #[inline]
    pub fn validated(self) -> Option<Self> {
        self.is_valid().then_some(self)
    }

    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(0.0, 0.0).is_valid());
        assert!(Coordinate::new(90.0, 180.0).is_valid());
        assert!(Coordinate::new(-90.0, -180.0).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, 181.0).is_valid());
    }

    #[test]
    fn test_non_finite_is_invalid() {
        assert!(!Coordinate::new(f64::NAN, 35.5).is_valid());
        assert!(!Coordinate::new(33.9, f64::INFINITY).is_valid());
        assert!(!Coordinate::new(f64::NEG_INFINITY, 0.0).is_valid());
        assert_eq!(Coordinate::new(f64::NAN, 0.0).validated(), None);
    }

    #[test]
    fn test_validated_keeps_good_values() {
        let coord = Coordinate::new(33.8938, 35.5018);
        assert_eq!(coord.validated(), Some(coord));
    }

    #[test]
    fn test_coordinate_from_tuple() {
        let coord: Coordinate = (33.8938, 35.5018).into();
        assert_eq!(coord.latitude, 33.8938);
        assert_eq!(coord.longitude, 35.5018);
    }
}
