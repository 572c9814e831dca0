//! Quick relevance scoring.
//!
//! A cheap, non-fuzzy score for callers that want to order a handful of
//! already-filtered venues without running a full search. Higher is better.

use crate::record::CatalogRecord;

/// How well a venue name matches a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NameRelevance {
    /// No match
    None = 0,
    /// Contains substring
    Contains = 60,
    /// Starts with query
    StartsWith = 80,
    /// Exact match
    Exact = 100,
}

/// How well a category label matches a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CategoryRelevance {
    None = 0,
    Contains = 40,
    Exact = 70,
}

/// Points per tag containing the query.
pub const TAG_POINTS: f64 = 30.0;

/// Points per rating star.
pub const RATING_POINTS: f64 = 5.0;

/// Classify a lower-cased name against a lower-cased query.
pub fn name_relevance(name: &str, query: &str) -> NameRelevance {
    if name == query {
        NameRelevance::Exact
    } else if name.starts_with(query) {
        NameRelevance::StartsWith
    } else if name.contains(query) {
        NameRelevance::Contains
    } else {
        NameRelevance::None
    }
}

/// Classify a lower-cased category against a lower-cased query.
pub fn category_relevance(category: &str, query: &str) -> CategoryRelevance {
    if category == query {
        CategoryRelevance::Exact
    } else if category.contains(query) {
        CategoryRelevance::Contains
    } else {
        CategoryRelevance::None
    }
}

/// Tiered relevance of `record` for `query`.
///
/// Name and category tiers are added, each matching tag adds
/// [`TAG_POINTS`] and the rating adds [`RATING_POINTS`] per star, unrounded.
pub fn quick_relevance(record: &CatalogRecord, query: &str) -> f64 {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return 0.0;
    }

    let mut score = f64::from(name_relevance(&record.name.to_lowercase(), &query) as u8);
    score += f64::from(category_relevance(&record.category.to_lowercase(), &query) as u8);
    score += TAG_POINTS
        * record
            .tags
            .iter()
            .filter(|tag| tag.to_lowercase().contains(&query))
            .count() as f64;

    let rating = record.rating.filter(|r| r.is_finite()).unwrap_or(0.0).clamp(0.0, 5.0);
    score + rating * RATING_POINTS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_tiers() {
        assert_eq!(name_relevance("sushi zen", "sushi zen"), NameRelevance::Exact);
        assert_eq!(name_relevance("sushi zen", "sushi"), NameRelevance::StartsWith);
        assert_eq!(name_relevance("al sultan grill", "sultan"), NameRelevance::Contains);
        assert_eq!(name_relevance("alsultan", "sultan"), NameRelevance::Contains);
        assert_eq!(name_relevance("tannour", "sultan"), NameRelevance::None);
    }

    #[test]
    fn test_mid_name_match_scores_contains_tier() {
        let record = CatalogRecord::new("1", "Al Sultan Grill", "Lebanese");
        assert_eq!(quick_relevance(&record, "sultan"), 60.0);
    }

    #[test]
    fn test_category_tiers() {
        assert_eq!(category_relevance("lebanese", "lebanese"), CategoryRelevance::Exact);
        assert_eq!(category_relevance("modern lebanese", "lebanese"), CategoryRelevance::Contains);
        assert_eq!(category_relevance("thai", "lebanese"), CategoryRelevance::None);
    }

    #[test]
    fn test_quick_relevance_adds_up() {
        let record = CatalogRecord::new("1", "Al Sultan Grill", "Lebanese")
            .with_tags(["grill", "mixed grill", "family"])
            .with_rating(4.8, 120);
        // contains 60 + two tags 60 + rating 24
        assert!((quick_relevance(&record, "Grill") - (60.0 + 60.0 + 24.0)).abs() < 1e-9);
        // category exact 70 + rating 24
        assert!((quick_relevance(&record, "lebanese") - (70.0 + 24.0)).abs() < 1e-9);
    }

    #[test]
    fn test_quick_relevance_without_match_is_rating_only() {
        let record = CatalogRecord::new("1", "Tannour", "Bakery").with_rating(4.3, 10);
        assert!((quick_relevance(&record, "pizza") - 21.5).abs() < 1e-9);
        assert_eq!(quick_relevance(&record, "  "), 0.0);
    }
}
