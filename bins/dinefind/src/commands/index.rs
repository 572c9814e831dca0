//! Index command - build the field index and report on it

use super::Context;
use crate::catalog::load_catalog;
use anyhow::Result;
use dinefind_cli::{Status, format_count, format_duration, progress};
use dinefind_search::SearchEngine;
use dinefind_telemetry::names;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct IndexReport {
    records: usize,
    fields: usize,
    fingerprint: String,
    build_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    duplicate_id: Option<String>,
}

pub fn run(ctx: &Context, catalog: &Path) -> Result<()> {
    let spinner = (!ctx.format.is_json()).then(|| progress::spinner("Indexing catalog..."));
    let catalog = match load_catalog(catalog) {
        Ok(catalog) => catalog,
        Err(e) => {
            if let Some(spinner) = &spinner {
                progress::finish_error(spinner, "Catalog could not be loaded");
            }
            return Err(e);
        }
    };

    let (index, elapsed) = ctx.timed(names::INDEX_BUILD_MS, || ctx.engine.build_index(&catalog));
    ctx.gauge(names::INDEX_RECORDS, index.len() as u64);

    let report = IndexReport {
        records: index.len(),
        fields: index.field_count(),
        fingerprint: format!("{:016x}", index.fingerprint()),
        build_ms: elapsed.as_secs_f64() * 1000.0,
        duplicate_id: SearchEngine::validate_catalog(&catalog)
            .err()
            .map(|e| e.to_string()),
    };

    if let Some(spinner) = spinner {
        progress::finish_success(&spinner, &format!("Indexed {}", format_count(report.records, "venue", "venues")));
    }

    if ctx.format.is_json() {
        return ctx.print_json(&report);
    }

    Status::field("Records", &report.records.to_string());
    Status::field("Fields", &report.fields.to_string());
    Status::field("Fingerprint", &report.fingerprint);
    Status::field("Build time", &format_duration(elapsed));
    Ok(())
}
