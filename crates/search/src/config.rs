//! Engine configuration.
//!
//! Every tunable of the ranking pipeline lives here so deployments can adjust
//! weights and boosts from a config file instead of code. All fields default
//! to the values the ranking tests are written against.

use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tolerance used when checking that field weights sum to 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Root configuration for a [`SearchEngine`](crate::SearchEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub weights: FieldWeights,

    #[serde(default)]
    pub matcher: MatcherOptions,

    #[serde(default)]
    pub boosts: BoostConfig,

    #[serde(default)]
    pub suggestions: SuggestionConfig,

    /// Seconds after which the field index is rebuilt on the next query
    #[serde(default = "default_index_ttl_secs")]
    pub index_ttl_secs: u64,

    /// Result cap used by callers that do not pass their own
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            weights: FieldWeights::default(),
            matcher: MatcherOptions::default(),
            boosts: BoostConfig::default(),
            suggestions: SuggestionConfig::default(),
            index_ttl_secs: default_index_ttl_secs(),
            default_limit: default_limit(),
        }
    }
}

fn default_index_ttl_secs() -> u64 {
    300
}

fn default_limit() -> usize {
    50
}

impl SearchConfig {
    /// Index staleness interval as a [`Duration`].
    pub fn index_ttl(&self) -> Duration {
        Duration::from_secs(self.index_ttl_secs)
    }

    /// Check every section, returning the first problem found.
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        self.matcher.validate()?;
        self.boosts.validate()?;
        self.suggestions.validate()?;
        if self.default_limit == 0 {
            return Err(SearchError::InvalidConfig("default_limit must be at least 1".into()));
        }
        Ok(())
    }
}

/// Per-field weights used when combining field hits into a record score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldWeights {
    #[serde(default = "default_name_weight")]
    pub name: f64,
    #[serde(default = "default_category_weight")]
    pub category: f64,
    #[serde(default = "default_tags_weight")]
    pub tags: f64,
    #[serde(default = "default_description_weight")]
    pub description: f64,
    #[serde(default = "default_address_weight")]
    pub address: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            name: default_name_weight(),
            category: default_category_weight(),
            tags: default_tags_weight(),
            description: default_description_weight(),
            address: default_address_weight(),
        }
    }
}

fn default_name_weight() -> f64 {
    0.40
}

fn default_category_weight() -> f64 {
    0.25
}

fn default_tags_weight() -> f64 {
    0.20
}

fn default_description_weight() -> f64 {
    0.10
}

fn default_address_weight() -> f64 {
    0.05
}

impl FieldWeights {
    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.name + self.category + self.tags + self.description + self.address
    }

    /// Returns true when the weights sum to 1.0 within tolerance.
    pub fn sums_to_one(&self) -> bool {
        (self.total() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE
    }

    fn validate(&self) -> Result<()> {
        let all = [self.name, self.category, self.tags, self.description, self.address];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(SearchError::InvalidConfig(
                "field weights must be finite and non-negative".into(),
            ));
        }
        if !self.sums_to_one() {
            return Err(SearchError::InvalidConfig(format!(
                "field weights must sum to 1.0, got {:.6}",
                self.total()
            )));
        }
        Ok(())
    }
}

/// Options for the approximate matcher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatcherOptions {
    /// Maximum dissimilarity accepted as a field hit
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Chars over which a match offset costs a full unit of dissimilarity
    #[serde(default = "default_distance")]
    pub distance: usize,

    /// Char offset where matches are expected to start
    #[serde(default)]
    pub location: usize,

    /// Queries shorter than this use exact prefix matching
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,
}

impl Default for MatcherOptions {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            distance: default_distance(),
            location: 0,
            min_query_chars: default_min_query_chars(),
        }
    }
}

fn default_threshold() -> f64 {
    0.4
}

fn default_distance() -> usize {
    100
}

fn default_min_query_chars() -> usize {
    2
}

impl MatcherOptions {
    /// Same options with a different threshold and distance.
    pub fn with_limits(self, threshold: f64, distance: usize) -> Self {
        Self { threshold, distance, ..self }
    }

    fn validate(&self) -> Result<()> {
        check_unit("matcher.threshold", self.threshold)
    }
}

/// Multiplicative ranking adjustments. Lower composite scores rank higher,
/// so every factor lies in (0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoostConfig {
    /// Factor when the record name contains the query
    #[serde(default = "default_name_match")]
    pub name_match: f64,

    /// Factor when the category label contains the query
    #[serde(default = "default_category_match")]
    pub category_match: f64,

    /// Largest reduction a perfect rating earns
    #[serde(default = "default_rating_weight")]
    pub rating_weight: f64,

    /// Rating scale maximum
    #[serde(default = "default_max_rating")]
    pub max_rating: f64,

    /// Largest reduction a saturated review count earns
    #[serde(default = "default_review_weight")]
    pub review_weight: f64,

    /// Review count at which the review boost saturates
    #[serde(default = "default_review_saturation")]
    pub review_saturation: f64,

    /// Largest reduction a venue at the user's position earns
    #[serde(default = "default_distance_weight")]
    pub distance_weight: f64,

    /// Distance in km beyond which proximity earns nothing
    #[serde(default = "default_distance_horizon_km")]
    pub distance_horizon_km: f64,

    /// Factor for featured venues
    #[serde(default = "default_promoted")]
    pub promoted: f64,
}

impl Default for BoostConfig {
    fn default() -> Self {
        Self {
            name_match: default_name_match(),
            category_match: default_category_match(),
            rating_weight: default_rating_weight(),
            max_rating: default_max_rating(),
            review_weight: default_review_weight(),
            review_saturation: default_review_saturation(),
            distance_weight: default_distance_weight(),
            distance_horizon_km: default_distance_horizon_km(),
            promoted: default_promoted(),
        }
    }
}

fn default_name_match() -> f64 {
    0.70
}

fn default_category_match() -> f64 {
    0.80
}

fn default_rating_weight() -> f64 {
    0.10
}

fn default_max_rating() -> f64 {
    5.0
}

fn default_review_weight() -> f64 {
    0.05
}

fn default_review_saturation() -> f64 {
    100.0
}

fn default_distance_weight() -> f64 {
    0.10
}

fn default_distance_horizon_km() -> f64 {
    20.0
}

fn default_promoted() -> f64 {
    0.95
}

impl BoostConfig {
    fn validate(&self) -> Result<()> {
        check_unit("boosts.name_match", self.name_match)?;
        check_unit("boosts.category_match", self.category_match)?;
        check_unit("boosts.promoted", self.promoted)?;
        check_fraction("boosts.rating_weight", self.rating_weight)?;
        check_fraction("boosts.review_weight", self.review_weight)?;
        check_fraction("boosts.distance_weight", self.distance_weight)?;
        check_positive("boosts.max_rating", self.max_rating)?;
        check_positive("boosts.review_saturation", self.review_saturation)?;
        check_positive("boosts.distance_horizon_km", self.distance_horizon_km)
    }
}

/// Limits and thresholds for autocomplete.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// Venue names must score strictly below this
    #[serde(default = "default_venue_threshold")]
    pub venue_threshold: f64,

    /// Cuisines must score strictly below this
    #[serde(default = "default_cuisine_threshold")]
    pub cuisine_threshold: f64,

    /// Match distance used for cuisine names and variants
    #[serde(default = "default_cuisine_distance")]
    pub cuisine_distance: usize,

    #[serde(default = "default_max_venues")]
    pub max_venues: usize,

    #[serde(default = "default_max_cuisines")]
    pub max_cuisines: usize,

    #[serde(default = "default_max_tags")]
    pub max_tags: usize,

    #[serde(default = "default_max_total")]
    pub max_total: usize,

    /// Threshold for the standalone cuisine autocomplete list
    #[serde(default = "default_autocomplete_threshold")]
    pub autocomplete_threshold: f64,

    #[serde(default = "default_max_autocomplete")]
    pub max_autocomplete: usize,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            venue_threshold: default_venue_threshold(),
            cuisine_threshold: default_cuisine_threshold(),
            cuisine_distance: default_cuisine_distance(),
            max_venues: default_max_venues(),
            max_cuisines: default_max_cuisines(),
            max_tags: default_max_tags(),
            max_total: default_max_total(),
            autocomplete_threshold: default_autocomplete_threshold(),
            max_autocomplete: default_max_autocomplete(),
        }
    }
}

fn default_venue_threshold() -> f64 {
    0.6
}

fn default_cuisine_threshold() -> f64 {
    0.5
}

fn default_cuisine_distance() -> usize {
    50
}

fn default_max_venues() -> usize {
    3
}

fn default_max_cuisines() -> usize {
    3
}

fn default_max_tags() -> usize {
    2
}

fn default_max_total() -> usize {
    8
}

fn default_autocomplete_threshold() -> f64 {
    0.4
}

fn default_max_autocomplete() -> usize {
    5
}

impl SuggestionConfig {
    fn validate(&self) -> Result<()> {
        check_unit("suggestions.venue_threshold", self.venue_threshold)?;
        check_unit("suggestions.cuisine_threshold", self.cuisine_threshold)?;
        check_unit("suggestions.autocomplete_threshold", self.autocomplete_threshold)
    }
}

/// Accepts values in (0, 1].
fn check_unit(name: &str, value: f64) -> Result<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(SearchError::InvalidConfig(format!("{} must be in (0, 1], got {}", name, value)))
    }
}

/// Accepts values in [0, 1).
fn check_fraction(name: &str, value: f64) -> Result<()> {
    if (0.0..1.0).contains(&value) {
        Ok(())
    } else {
        Err(SearchError::InvalidConfig(format!("{} must be in [0, 1), got {}", name, value)))
    }
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SearchError::InvalidConfig(format!("{} must be positive, got {}", name, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchErrorCode;

    #[test]
    fn test_default_config_is_valid() {
        let config = SearchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.index_ttl(), Duration::from_secs(300));
        assert_eq!(config.default_limit, 50);
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let weights = FieldWeights::default();
        assert!(weights.sums_to_one());
        assert_eq!(weights.name, 0.40);
        assert_eq!(weights.category, 0.25);
        assert_eq!(weights.tags, 0.20);
        assert_eq!(weights.description, 0.10);
        assert_eq!(weights.address, 0.05);
    }

    #[test]
    fn test_unbalanced_weights_rejected() {
        let config = SearchConfig {
            weights: FieldWeights { name: 0.9, ..FieldWeights::default() },
            ..SearchConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.code(), SearchErrorCode::InvalidConfig);
        assert!(err.to_string().contains("sum to 1.0"));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let weights = FieldWeights {
            name: 0.5,
            address: -0.05,
            ..FieldWeights::default()
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn test_boost_factor_out_of_range_rejected() {
        let config = SearchConfig {
            boosts: BoostConfig { name_match: 1.5, ..BoostConfig::default() },
            ..SearchConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SearchConfig {
            boosts: BoostConfig { distance_horizon_km: 0.0, ..BoostConfig::default() },
            ..SearchConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_default_limit_rejected() {
        let config = SearchConfig { default_limit: 0, ..SearchConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SearchConfig =
            serde_json::from_str(r#"{"boosts": {"promoted": 0.9}, "index_ttl_secs": 60}"#).unwrap();
        assert_eq!(config.boosts.promoted, 0.9);
        assert_eq!(config.boosts.name_match, 0.70);
        assert_eq!(config.index_ttl_secs, 60);
        assert_eq!(config.weights, FieldWeights::default());
    }
}
