//! Catalog records and the result types built from them.

use crate::error::Result;
use dinefind_geo::{Coordinate, parse_location};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A venue as handed to the engine by the caller.
///
/// The engine only reads records. Every field except `id` is optional on the
/// wire; a record without a name simply never matches on the name field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Stable unique identifier
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Cuisine or category label
    #[serde(default, alias = "cuisine_type")]
    pub category: String,
    /// Free-form tags, order irrelevant
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Average rating on a 0-5 scale
    #[serde(default, alias = "average_rating", skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, alias = "total_reviews")]
    pub review_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<Coordinate>,
    /// Editorially featured
    #[serde(default)]
    pub featured: bool,
    /// Featured by the recommendation pipeline
    #[serde(default)]
    pub ai_featured: bool,
}

impl CatalogRecord {
    /// Creates a record with only an id, name and category set.
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            tags: Vec::new(),
            description: None,
            address: None,
            rating: None,
            review_count: 0,
            coordinate: None,
            featured: false,
            ai_featured: false,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_rating(mut self, rating: f64, review_count: u32) -> Self {
        self.rating = Some(rating);
        self.review_count = review_count;
        self
    }

    pub fn with_coordinate(mut self, coordinate: Coordinate) -> Self {
        self.coordinate = Some(coordinate);
        self
    }

    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    /// True when any promotional flag is set.
    #[inline]
    pub fn is_promoted(&self) -> bool {
        self.featured || self.ai_featured
    }
}

/// Parse one record from JSON.
///
/// Exports from the venue database carry the position as `location`, either
/// a GeoJSON point or a WKT string. It fills `coordinate` when that is unset.
pub fn parse_record(value: serde_json::Value) -> Result<CatalogRecord> {
    let location = value.get("location").and_then(parse_location);
    let mut record: CatalogRecord = serde_json::from_value(value)?;
    if record.coordinate.is_none() {
        record.coordinate = location;
    }
    Ok(record)
}

/// Parse a JSON array of records.
pub fn parse_catalog(json: &str) -> Result<Vec<CatalogRecord>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
    values.into_iter().map(parse_record).collect()
}

/// Searchable field of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Name,
    Category,
    Tag,
    Description,
    Address,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Name => "name",
            FieldKind::Category => "category",
            FieldKind::Tag => "tag",
            FieldKind::Description => "description",
            FieldKind::Address => "address",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field that matched a query variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMatch {
    pub field: FieldKind,
    /// Lower-cased field text that matched
    pub value: String,
    /// Matcher dissimilarity before weighting, 0 = identical
    pub score: f64,
}

/// Search result with its ranking metadata.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult<T> {
    /// The matched item
    pub item: T,
    /// Composite score (lower is better); `None` for unranked pass-through
    #[serde(rename = "search_score", skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Weighted dissimilarity before secondary signals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_score: Option<f64>,
    /// Query variant that produced the best hit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_query: Option<String>,
    /// Field hits, best first
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<FieldMatch>,
}

impl<T> SearchResult<T> {
    /// Wraps an item that was returned without ranking.
    pub fn unranked(item: T) -> Self {
        Self {
            item,
            score: None,
            raw_score: None,
            matched_query: None,
            matches: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_source_field_names() {
        let json = r#"{
            "id": "r1",
            "name": "Al Sultan Grill",
            "cuisine_type": "Lebanese",
            "average_rating": 4.8,
            "total_reviews": 120,
            "tags": ["grill", "family"]
        }"#;
        let record: CatalogRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.category, "Lebanese");
        assert_eq!(record.rating, Some(4.8));
        assert_eq!(record.review_count, 120);
        assert!(!record.is_promoted());
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let record: CatalogRecord = serde_json::from_str(r#"{"id": "bare"}"#).unwrap();
        assert!(record.name.is_empty());
        assert!(record.tags.is_empty());
        assert_eq!(record.rating, None);
        assert_eq!(record.coordinate, None);
    }

    #[test]
    fn test_parse_catalog_resolves_location() {
        let json = r#"[
            {"id": "geojson", "name": "A", "location": {"type": "Point", "coordinates": [35.5018, 33.8938]}},
            {"id": "wkt", "name": "B", "location": "SRID=4326;POINT(35.8498 34.4332)"},
            {"id": "explicit", "name": "C", "coordinate": {"latitude": 1.0, "longitude": 2.0}, "location": "POINT(0 0)"},
            {"id": "broken", "name": "D", "location": "POINT(500 500)"}
        ]"#;
        let catalog = parse_catalog(json).unwrap();
        assert!((catalog[0].coordinate.unwrap().latitude - 33.8938).abs() < 1e-9);
        assert!((catalog[1].coordinate.unwrap().longitude - 35.8498).abs() < 1e-9);
        assert_eq!(catalog[2].coordinate, Some(Coordinate::new(1.0, 2.0)));
        assert_eq!(catalog[3].coordinate, None);
    }

    #[test]
    fn test_parse_catalog_rejects_non_array() {
        assert!(parse_catalog(r#"{"id": "x"}"#).is_err());
        assert!(parse_catalog(r#"[{"name": "no id"}]"#).is_err());
    }

    #[test]
    fn test_promoted_flags() {
        let mut record = CatalogRecord::new("1", "Place", "Cafe");
        assert!(!record.is_promoted());
        record.ai_featured = true;
        assert!(record.is_promoted());
        assert!(CatalogRecord::new("2", "Other", "Cafe").featured().is_promoted());
    }

    #[test]
    fn test_unranked_result_serializes_without_score() {
        let result = SearchResult::unranked(CatalogRecord::new("1", "Place", "Cafe"));
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("search_score"));
        assert!(json.contains("\"id\":\"1\""));
    }
}
