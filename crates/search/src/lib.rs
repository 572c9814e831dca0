//! Typo-tolerant venue search.
//!
//! This crate provides:
//! - A cuisine synonym table with many-to-one variant lookup
//! - Bit-parallel approximate substring matching
//! - A weighted per-field index with staleness and content tracking
//! - Ranking that fuses text relevance with rating, reviews, distance and
//!   promotion
//! - Autocomplete suggestions for partial queries
//!
//! # Example
//!
//! ```
//! use dinefind_search::{CatalogRecord, SearchEngine};
//!
//! let catalog = vec![
//!     CatalogRecord::new("1", "Al Sultan Grill", "Lebanese"),
//!     CatalogRecord::new("2", "Sushi Zen", "Japanese"),
//! ];
//!
//! let engine = SearchEngine::with_defaults();
//! let ranked = engine.search("lebanse food", &catalog, None, 10);
//! assert_eq!(ranked.results[0].item.id, "1");
//! ```

mod config;
mod engine;
mod error;
mod fuzzy;
mod index;
mod query;
mod record;
mod relevance;
mod scoring;
mod suggest;
mod synonyms;

#[cfg(feature = "wasm")]
mod wasm;

pub use config::{
    BoostConfig, FieldWeights, MatcherOptions, SearchConfig, SuggestionConfig, WEIGHT_SUM_TOLERANCE,
};
pub use engine::{RankedResult, SearchEngine};
pub use error::{Result, SearchError, SearchErrorCode};
pub use fuzzy::{MAX_BITAP_CHARS, Matcher, Pattern, levenshtein_distance};
pub use index::{FieldIndex, IndexEntry, IndexedField, fingerprint};
pub use query::{DINING_TERMS, QueryExpander, normalize};
pub use record::{CatalogRecord, FieldKind, FieldMatch, SearchResult, parse_catalog, parse_record};
pub use relevance::{CategoryRelevance, NameRelevance, category_relevance, name_relevance, quick_relevance};
pub use scoring::{EntryScore, MatchCandidate, composite_score, field_contribution, score_entry};
pub use suggest::{MIN_SUGGEST_CHARS, Suggestion, SuggestionGenerator, SuggestionKind};
pub use synonyms::{CUISINE_VARIANTS, SynonymTable, resolve_cuisine_aliases};

pub use dinefind_geo::Coordinate;
