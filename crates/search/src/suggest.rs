//! Autocomplete suggestions.
//!
//! Three sources feed the list: venue names (fuzzy), cuisines (fuzzy, through
//! the synonym table and the catalog's own category labels) and tags (plain
//! substring). Each source is capped separately before the merge.

use crate::config::{MatcherOptions, SuggestionConfig};
use crate::fuzzy::{Matcher, Pattern};
use crate::query::normalize;
use crate::record::CatalogRecord;
use crate::synonyms::SynonymTable;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Shortest partial query that produces suggestions.
pub const MIN_SUGGEST_CHARS: usize = 2;

/// Where a suggestion came from. Declaration order is the merge tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    Venue,
    Cuisine,
    Tag,
}

/// An autocomplete candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    /// Text to put in the search box
    pub value: String,
    /// Text to display
    pub label: String,
    /// Dissimilarity, lower is better
    pub score: f64,
}

impl Suggestion {
    fn venue(record: &CatalogRecord, score: f64) -> Self {
        Self {
            kind: SuggestionKind::Venue,
            value: record.name.clone(),
            label: format!("{} • {}", record.name, record.category),
            score,
        }
    }

    fn cuisine(name: &str, score: f64) -> Self {
        Self {
            kind: SuggestionKind::Cuisine,
            value: name.to_string(),
            label: format!("{} cuisine", name),
            score,
        }
    }

    fn tag(tag: &str) -> Self {
        Self {
            kind: SuggestionKind::Tag,
            value: tag.to_string(),
            label: format!("Places with {}", tag),
            score: 0.0,
        }
    }
}

/// Builds suggestion lists for partial queries.
#[derive(Debug, Clone)]
pub struct SuggestionGenerator {
    config: SuggestionConfig,
    venue_matcher: Matcher,
    cuisine_matcher: Matcher,
    table: &'static SynonymTable,
}

impl SuggestionGenerator {
    pub fn new(config: SuggestionConfig, matcher: MatcherOptions) -> Self {
        Self {
            venue_matcher: Matcher::new(matcher.with_limits(config.venue_threshold, matcher.distance)),
            cuisine_matcher: Matcher::new(matcher.with_limits(config.cuisine_threshold, config.cuisine_distance)),
            config,
            table: SynonymTable::global(),
        }
    }

    /// Suggestions for `partial` drawn from `catalog`, best first.
    ///
    /// Duplicates are dropped on the lower-cased `value`, not the label:
    /// labels always carry a kind-specific decoration ("• category",
    /// "cuisine", "Places with"), so a venue named "Thai" and the Thai
    /// cuisine would otherwise both survive.
    pub fn suggest(&self, partial: &str, catalog: &[CatalogRecord]) -> Vec<Suggestion> {
        let query = normalize(partial);
        if query.chars().count() < MIN_SUGGEST_CHARS {
            return Vec::new();
        }
        let pattern = Pattern::new(&query);

        let mut all = self.venues(&pattern, catalog);
        all.extend(self.cuisines(&pattern, catalog));
        all.extend(self.tags(&query, catalog));

        all.sort_by(|a, b| {
            a.score
                .total_cmp(&b.score)
                .then_with(|| a.kind.cmp(&b.kind))
                .then_with(|| a.value.cmp(&b.value))
        });

        let mut seen = HashSet::new();
        all.retain(|s| seen.insert(s.value.to_lowercase()));
        all.truncate(self.config.max_total);
        all
    }

    /// Canonical cuisines close to `partial`, best first.
    pub fn cuisine_autocomplete(&self, partial: &str) -> Vec<&'static str> {
        let query = normalize(partial);
        if query.chars().count() < MIN_SUGGEST_CHARS {
            return Vec::new();
        }
        let pattern = Pattern::new(&query);
        let threshold = self.config.autocomplete_threshold;

        let mut hits: Vec<(f64, &'static str)> = self
            .table
            .canonical_names()
            .filter_map(|name| {
                let score = self.cuisine_score(&pattern, name, threshold)?;
                (score < threshold).then_some((score, name))
            })
            .collect();

        hits.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(b.1)));
        hits.into_iter().take(self.config.max_autocomplete).map(|(_, name)| name).collect()
    }

    fn venues(&self, pattern: &Pattern, catalog: &[CatalogRecord]) -> Vec<Suggestion> {
        let threshold = self.config.venue_threshold;
        let mut hits: Vec<(f64, &CatalogRecord)> = catalog
            .iter()
            .filter_map(|record| {
                let name = normalize(&record.name);
                let score = self.venue_matcher.score_within(pattern, &name, threshold)?;
                (score < threshold).then_some((score, record))
            })
            .collect();

        hits.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.name.cmp(&b.1.name)));
        hits.into_iter()
            .take(self.config.max_venues)
            .map(|(score, record)| Suggestion::venue(record, score))
            .collect()
    }

    fn cuisines(&self, pattern: &Pattern, catalog: &[CatalogRecord]) -> Vec<Suggestion> {
        let threshold = self.config.cuisine_threshold;

        // Canonical names first, then catalog labels the table does not know.
        let mut candidates: Vec<&str> = self.table.canonical_names().collect();
        let mut known: HashSet<String> = candidates.iter().map(|c| c.to_lowercase()).collect();
        for record in catalog {
            let category = record.category.trim();
            if !category.is_empty() && known.insert(category.to_lowercase()) {
                candidates.push(category);
            }
        }

        let mut hits: Vec<(f64, &str)> = candidates
            .into_iter()
            .filter_map(|name| {
                let score = self.cuisine_score(pattern, name, threshold)?;
                (score < threshold).then_some((score, name))
            })
            .collect();

        hits.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(b.1)));
        hits.into_iter()
            .take(self.config.max_cuisines)
            .map(|(score, name)| Suggestion::cuisine(name, score))
            .collect()
    }

    /// Best of the direct match and, for canonical cuisines, every variant.
    fn cuisine_score(&self, pattern: &Pattern, name: &str, threshold: f64) -> Option<f64> {
        let direct = self.cuisine_matcher.score_within(pattern, &normalize(name), threshold);
        let via_variants = self
            .table
            .variants_of(name)
            .into_iter()
            .flatten()
            .filter_map(|variant| self.cuisine_matcher.score_within(pattern, variant, threshold));

        direct.into_iter().chain(via_variants).min_by(f64::total_cmp)
    }

    fn tags(&self, query: &str, catalog: &[CatalogRecord]) -> Vec<Suggestion> {
        // Keyed on normalized text; the first spelling seen is displayed.
        let mut vocabulary: BTreeMap<String, &str> = BTreeMap::new();
        for tag in catalog.iter().flat_map(|r| r.tags.iter()) {
            let tag = tag.trim();
            if !tag.is_empty() {
                vocabulary.entry(normalize(tag)).or_insert(tag);
            }
        }

        vocabulary
            .iter()
            .filter(|(lower, _)| lower.contains(query))
            .take(self.config.max_tags)
            .map(|(_, tag)| Suggestion::tag(tag))
            .collect()
    }
}

impl Default for SuggestionGenerator {
    fn default() -> Self {
        Self::new(SuggestionConfig::default(), MatcherOptions::default())
    }
}
