//! The search engine.
//!
//! [`SearchEngine`] ties the pieces together: it owns the configuration, the
//! compiled matchers and a cached [`FieldIndex`] that is rebuilt when the
//! catalog changes or the index ages out.

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::fuzzy::{Matcher, Pattern};
use crate::index::{FieldIndex, IndexEntry};
use crate::query::{QueryExpander, normalize};
use crate::record::{CatalogRecord, SearchResult};
use crate::scoring::{MatchCandidate, composite_score, rank_order, score_entry};
use crate::suggest::{Suggestion, SuggestionGenerator};
use crate::synonyms::SynonymTable;
use dinefind_geo::Coordinate;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;
use tracing::{debug, warn};

/// Output of [`SearchEngine::search`].
#[derive(Debug, Clone, Serialize)]
pub struct RankedResult<'a> {
    /// Matches, best first, at most `limit`
    pub results: Vec<SearchResult<&'a CatalogRecord>>,
    pub suggestions: Vec<Suggestion>,
    /// Distinct matching records before truncation
    pub total_results: usize,
    pub search_time_ms: u64,
    pub has_more: bool,
}

impl RankedResult<'_> {
    /// Ids of the returned records, in rank order.
    pub fn ids(&self) -> Vec<&str> {
        self.results.iter().map(|r| r.item.id.as_str()).collect()
    }
}

/// Typo-tolerant venue search over caller-supplied catalog snapshots.
///
/// The engine is `Send + Sync`; one instance can serve concurrent queries.
///
/// # Example
/// ```
/// use dinefind_search::{CatalogRecord, SearchEngine};
///
/// let catalog = vec![
///     CatalogRecord::new("1", "Al Sultan Grill", "Lebanese").with_rating(4.8, 120),
///     CatalogRecord::new("2", "Sultan's Diner", "American").with_rating(3.2, 5),
/// ];
///
/// let engine = SearchEngine::with_defaults();
/// let ranked = engine.search("sultan", &catalog, None, 10);
/// assert_eq!(ranked.ids(), vec!["1", "2"]);
/// ```
#[derive(Debug)]
pub struct SearchEngine {
    config: SearchConfig,
    matcher: Matcher,
    expander: QueryExpander,
    suggestions: SuggestionGenerator,
    index: RwLock<Option<Arc<FieldIndex>>>,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl SearchEngine {
    /// Creates an engine after validating `config`.
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    /// Creates an engine with the default configuration.
    pub fn with_defaults() -> Self {
        Self::from_valid(SearchConfig::default())
    }

    fn from_valid(config: SearchConfig) -> Self {
        Self {
            matcher: Matcher::new(config.matcher),
            expander: QueryExpander::new(SynonymTable::global()),
            suggestions: SuggestionGenerator::new(config.suggestions, config.matcher),
            index: RwLock::new(None),
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Build an index for `catalog` and publish it, replacing any previous
    /// one. Queries already running keep the snapshot they started with.
    pub fn build_index(&self, catalog: &[CatalogRecord]) -> Arc<FieldIndex> {
        let index = Arc::new(FieldIndex::build(catalog, &self.config.weights));
        *self.index.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&index));
        index
    }

    /// True when there is no index or it is older than the configured TTL.
    pub fn is_index_stale(&self) -> bool {
        self.index_snapshot()
            .is_none_or(|index| index.is_stale(self.config.index_ttl()))
    }

    /// The currently published index, if any.
    pub fn index_snapshot(&self) -> Option<Arc<FieldIndex>> {
        self.index.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Index for `catalog`, rebuilding when missing, stale or built from
    /// different content.
    fn index_for(&self, catalog: &[CatalogRecord]) -> Arc<FieldIndex> {
        match self.index_snapshot() {
            Some(index) if !index.is_stale(self.config.index_ttl()) && index.matches(catalog) => index,
            Some(_) => {
                debug!(records = catalog.len(), "Field index stale or catalog replaced, rebuilding");
                self.build_index(catalog)
            }
            None => self.build_index(catalog),
        }
    }

    /// Rank `catalog` against `query`.
    ///
    /// A blank query returns the first `limit` records unranked, in catalog
    /// order. `user` locations that are out of range or not finite are
    /// ignored.
    ///
    /// # Panics
    /// If `limit` is zero.
    pub fn search<'a>(
        &self,
        query: &str,
        catalog: &'a [CatalogRecord],
        user: Option<Coordinate>,
        limit: usize,
    ) -> RankedResult<'a> {
        assert!(limit >= 1, "search limit must be at least 1");
        let start = Instant::now();

        let normalized = normalize(query);
        if normalized.is_empty() {
            return RankedResult {
                results: catalog.iter().take(limit).map(SearchResult::unranked).collect(),
                suggestions: Vec::new(),
                total_results: catalog.len(),
                search_time_ms: start.elapsed().as_millis() as u64,
                has_more: catalog.len() > limit,
            };
        }

        let user = user.and_then(|coord| {
            let valid = coord.validated();
            if valid.is_none() {
                warn!(latitude = coord.latitude, longitude = coord.longitude, "Ignoring invalid user location");
            }
            valid
        });

        let index = self.index_for(catalog);
        let variants = self.expander.expand(&normalized);
        let patterns: Vec<Pattern> = variants.iter().map(|v| Pattern::new(v)).collect();

        let candidate = |(position, entry): (usize, &IndexEntry)| {
            self.score_candidate(position, entry, catalog, &patterns, &normalized, user.as_ref())
        };

        #[cfg(feature = "parallel")]
        let mut candidates: Vec<MatchCandidate> = {
            use rayon::prelude::*;
            index.entries().par_iter().enumerate().filter_map(candidate).collect()
        };

        #[cfg(not(feature = "parallel"))]
        let mut candidates: Vec<MatchCandidate> =
            index.entries().iter().enumerate().filter_map(candidate).collect();

        candidates.sort_by(|a, b| {
            rank_order(
                (a.score, catalog[a.position].id.as_str()),
                (b.score, catalog[b.position].id.as_str()),
            )
        });

        let total_results = candidates.len();
        candidates.truncate(limit);

        let results = candidates
            .into_iter()
            .map(|c| SearchResult {
                item: &catalog[c.position],
                score: Some(c.score),
                raw_score: Some(c.raw_score),
                matched_query: Some(c.matched_query),
                matches: c.matches,
            })
            .collect();

        let suggestions = self.suggestions.suggest(&normalized, catalog);
        let search_time_ms = start.elapsed().as_millis() as u64;

        debug!(
            query = %normalized,
            variants = variants.len(),
            matches = total_results,
            elapsed_ms = search_time_ms,
            "Search completed"
        );

        RankedResult {
            results,
            suggestions,
            total_results,
            search_time_ms,
            has_more: total_results > limit,
        }
    }

    /// Best hit of one record across all query variants, with boosts applied.
    fn score_candidate(
        &self,
        position: usize,
        entry: &IndexEntry,
        catalog: &[CatalogRecord],
        patterns: &[Pattern],
        query: &str,
        user: Option<&Coordinate>,
    ) -> Option<MatchCandidate> {
        let record = catalog.get(position)?;
        let (pattern, hit) = patterns
            .iter()
            .filter_map(|pattern| score_entry(&self.matcher, pattern, entry).map(|hit| (pattern, hit)))
            .min_by(|a, b| a.1.raw.total_cmp(&b.1.raw))?;

        Some(MatchCandidate {
            position,
            score: composite_score(hit.raw, record, query, user, &self.config.boosts),
            raw_score: hit.raw,
            matched_query: pattern.as_str().to_string(),
            matches: hit.matches,
        })
    }

    /// Autocomplete suggestions for a partial query.
    pub fn suggest(&self, partial: &str, catalog: &[CatalogRecord]) -> Vec<Suggestion> {
        self.suggestions.suggest(partial, catalog)
    }

    /// Canonical cuisines close to a partial query.
    pub fn cuisine_suggestions(&self, partial: &str) -> Vec<&'static str> {
        self.suggestions.cuisine_autocomplete(partial)
    }

    /// Canonical cuisines mentioned in `text`.
    pub fn resolve_cuisine_aliases(&self, text: &str) -> BTreeSet<&'static str> {
        crate::synonyms::resolve_cuisine_aliases(text)
    }

    /// Check that every record id is unique.
    pub fn validate_catalog(catalog: &[CatalogRecord]) -> Result<()> {
        let mut seen = HashSet::with_capacity(catalog.len());
        match catalog.iter().find(|record| !seen.insert(record.id.as_str())) {
            Some(duplicate) => Err(SearchError::DuplicateRecordId(duplicate.id.clone())),
            None => Ok(()),
        }
    }
}
