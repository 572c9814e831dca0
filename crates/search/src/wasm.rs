//! WASM bindings for venue search.
//!
//! Every function takes and returns JSON strings so the bindings can be
//! called from both browser and Deno code. A single engine is shared by all
//! calls, so the field index survives between keystrokes.

use crate::{SearchEngine, SearchError, parse_catalog, parse_record, quick_relevance};
use dinefind_geo::Coordinate;
use once_cell::sync::Lazy;
use wasm_bindgen::prelude::*;

static ENGINE: Lazy<SearchEngine> = Lazy::new(SearchEngine::with_defaults);

fn to_js(err: SearchError) -> JsValue {
    JsValue::from_str(&format!("[{}] {}", err.code() as u32, err))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| to_js(e.into()))
}

/// Search a catalog.
///
/// # Arguments
/// * `query` - Raw query as typed
/// * `catalog_json` - JSON array of venue records
/// * `lat`, `lng` - Optional user position
/// * `limit` - Maximum results, at least 1
///
/// # Returns
/// JSON object with `results`, `suggestions`, `total_results`,
/// `search_time_ms` and `has_more`
#[wasm_bindgen]
pub fn search_catalog(
    query: &str,
    catalog_json: &str,
    lat: Option<f64>,
    lng: Option<f64>,
    limit: usize,
) -> Result<String, JsValue> {
    if limit == 0 {
        return Err(to_js(SearchError::InvalidQuery("limit must be at least 1".into())));
    }
    let catalog = parse_catalog(catalog_json).map_err(to_js)?;
    let user = lat.zip(lng).map(|(lat, lng)| Coordinate::new(lat, lng));

    to_json(&ENGINE.search(query, &catalog, user, limit))
}

/// Autocomplete suggestions as a JSON array.
#[wasm_bindgen]
pub fn suggest_catalog(query: &str, catalog_json: &str) -> Result<String, JsValue> {
    let catalog = parse_catalog(catalog_json).map_err(to_js)?;
    to_json(&ENGINE.suggest(query, &catalog))
}

/// Canonical cuisines mentioned in `text`, as a sorted JSON array.
#[wasm_bindgen]
pub fn resolve_cuisines(text: &str) -> Result<String, JsValue> {
    to_json(&ENGINE.resolve_cuisine_aliases(text))
}

/// Canonical cuisines close to a partial query, as a JSON array.
#[wasm_bindgen]
pub fn cuisine_autocomplete(partial: &str) -> Result<String, JsValue> {
    to_json(&ENGINE.cuisine_suggestions(partial))
}

/// Quick tiered relevance of one record (higher is better).
#[wasm_bindgen]
pub fn relevance_score(query: &str, record_json: &str) -> Result<f64, JsValue> {
    let value: serde_json::Value = serde_json::from_str(record_json).map_err(|e| to_js(e.into()))?;
    let record = parse_record(value).map_err(to_js)?;
    Ok(quick_relevance(&record, query))
}
