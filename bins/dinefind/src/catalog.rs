//! Catalog file loading

use anyhow::{Context, Result};
use dinefind_cli::Status;
use dinefind_search::{CatalogRecord, SearchEngine, parse_catalog};
use std::path::Path;

/// Read a JSON array of venue records.
///
/// Duplicate ids are reported on stderr but do not stop the command; the
/// engine keeps such records apart by position.
pub fn load_catalog(path: &Path) -> Result<Vec<CatalogRecord>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let catalog =
        parse_catalog(&content).with_context(|| format!("Failed to parse catalog {}", path.display()))?;

    if let Err(e) = SearchEngine::validate_catalog(&catalog) {
        Status::warning(&format!("{} ({})", e, path.display()));
    }

    tracing::debug!(records = catalog.len(), path = %path.display(), "Catalog loaded");
    Ok(catalog)
}
