//! Per-record scoring.
//!
//! Lower is better throughout: a field hit is a dissimilarity in [0, 1], and
//! every secondary signal is a multiplicative factor in (0, 1].

use crate::config::BoostConfig;
use crate::fuzzy::{Matcher, Pattern};
use crate::index::IndexEntry;
use crate::query::normalize;
use crate::record::{CatalogRecord, FieldMatch};
use dinefind_geo::{Coordinate, haversine_distance};
use std::cmp::Ordering;

/// Best hit of one record for one query variant.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryScore {
    /// Weighted dissimilarity of the best field
    pub raw: f64,
    /// Field hits, best first
    pub matches: Vec<FieldMatch>,
}

/// A record that matched during one search.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate {
    /// Position of the record in the catalog
    pub position: usize,
    pub raw_score: f64,
    /// Query variant that produced `raw_score`
    pub matched_query: String,
    pub matches: Vec<FieldMatch>,
    /// Composite score after boosts
    pub score: f64,
}

/// Dissimilarity a field hit contributes to its record.
///
/// A perfect hit on a field of weight `w` yields `1 - w`; a hit at the
/// threshold edge yields close to 1.
#[inline]
pub fn field_contribution(dissimilarity: f64, weight: f64) -> f64 {
    1.0 - weight * (1.0 - dissimilarity)
}

/// Match one compiled variant against every field of an entry.
///
/// Returns `None` when no field matches within the matcher threshold.
pub fn score_entry(matcher: &Matcher, pattern: &Pattern, entry: &IndexEntry) -> Option<EntryScore> {
    let mut hits: Vec<(f64, FieldMatch)> = entry
        .fields
        .iter()
        .filter_map(|field| {
            let d = matcher.score(pattern, &field.value)?;
            let hit = FieldMatch { field: field.kind, value: field.value.clone(), score: d };
            Some((field_contribution(d, field.weight), hit))
        })
        .collect();

    if hits.is_empty() {
        return None;
    }

    hits.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.field.cmp(&b.1.field)));
    let raw = hits[0].0;

    Some(EntryScore { raw, matches: hits.into_iter().map(|(_, hit)| hit).collect() })
}

/// Apply secondary signals to a raw dissimilarity.
///
/// `query` is the normalized original query. `user` must already be
/// validated; record coordinates that are out of range are ignored.
pub fn composite_score(
    raw: f64,
    record: &CatalogRecord,
    query: &str,
    user: Option<&Coordinate>,
    boosts: &BoostConfig,
) -> f64 {
    let mut score = raw;

    if !query.is_empty() && normalize(&record.name).contains(query) {
        score *= boosts.name_match;
    }
    if !query.is_empty() && normalize(&record.category).contains(query) {
        score *= boosts.category_match;
    }

    let rating = record
        .rating
        .filter(|r| r.is_finite())
        .unwrap_or(0.0)
        .clamp(0.0, boosts.max_rating);
    score *= 1.0 - (rating / boosts.max_rating) * boosts.rating_weight;

    let reviews = (record.review_count as f64 / boosts.review_saturation).min(1.0);
    score *= 1.0 - reviews * boosts.review_weight;

    if let (Some(user), Some(venue)) = (user, record.coordinate.and_then(Coordinate::validated)) {
        let km = haversine_distance(user, &venue);
        let proximity = (1.0 - km / boosts.distance_horizon_km).max(0.0);
        score *= 1.0 - proximity * boosts.distance_weight;
    }

    if record.is_promoted() {
        score *= boosts.promoted;
    }

    score
}

/// Ranking order: composite score, then record id.
pub fn rank_order(a: (f64, &str), b: (f64, &str)) -> Ordering {
    a.0.total_cmp(&b.0).then_with(|| a.1.cmp(b.1))
}
