//! Venue location parsing.
//!
//! Catalog exports store a venue's position in one of several shapes:
//! - GeoJSON: `{"type": "Point", "coordinates": [lng, lat]}`
//! - WKT: `"POINT(lng lat)"`, optionally prefixed with `SRID=4326;`
//! - Plain objects: `{"latitude": .., "longitude": ..}` or `{"lat": .., "lng": ..}`

use crate::{Coordinate, GeoError, Result};

/// Parse a venue location from a JSON value.
///
/// Returns `None` for null, unrecognised shapes and coordinates that are
/// out of range or not finite. Search treats all of these as "no location".
///
/// # Example
/// ```
/// use dinefind_geo::parse_location;
/// use serde_json::json;
///
/// let geojson = json!({"type": "Point", "coordinates": [35.5018, 33.8938]});
/// let coord = parse_location(&geojson).unwrap();
/// assert!((coord.latitude - 33.8938).abs() < 1e-4);
///
/// let wkt = json!("POINT(35.5018 33.8938)");
/// assert_eq!(parse_location(&wkt), Some(coord));
/// ```
pub fn parse_location(value: &serde_json::Value) -> Option<Coordinate> {
    let coord = match value {
        serde_json::Value::Object(map) => {
            if let Some(coords) = map.get("coordinates").and_then(|c| c.as_array()) {
                if coords.len() < 2 {
                    return None;
                }
                Coordinate::new(coords[1].as_f64()?, coords[0].as_f64()?)
            } else {
                let lat = map.get("latitude").or_else(|| map.get("lat"))?.as_f64()?;
                let lng = map
                    .get("longitude")
                    .or_else(|| map.get("lng"))
                    .or_else(|| map.get("lon"))?
                    .as_f64()?;
                Coordinate::new(lat, lng)
            }
        }
        serde_json::Value::String(wkt) => parse_wkt_point(wkt).ok()?,
        _ => return None,
    };

    coord.validated()
}

/// Parse a WKT `POINT(longitude latitude)` string.
///
/// An EWKT `SRID=...;` prefix is accepted and ignored.
pub fn parse_wkt_point(wkt: &str) -> Result<Coordinate> {
    let mut wkt = wkt.trim();
    if let Some((prefix, rest)) = wkt.split_once(';') {
        if prefix.trim_start().to_ascii_uppercase().starts_with("SRID=") {
            wkt = rest.trim();
        }
    }

    let body = wkt
        .get(..5)
        .filter(|kw| kw.eq_ignore_ascii_case("POINT"))
        .map(|_| wkt[5..].trim_start())
        .ok_or_else(|| GeoError::InvalidWkt(format!("Expected POINT, got: {}", wkt)))?;

    let inner = body
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| GeoError::InvalidWkt(format!("Unbalanced parentheses: {}", wkt)))?;

    let parts: Vec<&str> = inner.split_whitespace().collect();
    let [lng, lat] = parts.as_slice() else {
        return Err(GeoError::InvalidWkt(format!(
            "Expected 2 coordinates, got {}",
            parts.len()
        )));
    };

    let lng: f64 = lng
        .parse()
        .map_err(|_| GeoError::InvalidWkt(format!("Invalid longitude: {}", lng)))?;
    let lat: f64 = lat
        .parse()
        .map_err(|_| GeoError::InvalidWkt(format!("Invalid latitude: {}", lat)))?;

    Coordinate::new(lat, lng)
        .validated()
        .ok_or_else(|| GeoError::InvalidCoordinate(format!("({}, {}) is out of range", lat, lng)))
}
