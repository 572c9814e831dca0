//! Relevance command - quick tiered scores without fuzzy matching

use super::Context;
use crate::catalog::load_catalog;
use anyhow::{Result, ensure};
use dinefind_cli::{Status, format_count};
use dinefind_search::quick_relevance;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct Scored<'a> {
    id: &'a str,
    name: &'a str,
    score: f64,
}

/// Score every record and print the best `limit`, highest first
pub fn run(ctx: &Context, query: &str, catalog: &Path, limit: usize) -> Result<()> {
    ensure!(limit >= 1, "--limit must be at least 1");
    let catalog = load_catalog(catalog)?;

    let mut scored: Vec<Scored> = catalog
        .iter()
        .map(|record| Scored {
            id: &record.id,
            name: &record.name,
            score: quick_relevance(record, query),
        })
        .filter(|s| s.score > 0.0)
        .collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(b.id)));
    scored.truncate(limit);

    if ctx.format.is_json() {
        return ctx.print_json(&scored);
    }

    Status::header(&format!("{} for \"{}\"", format_count(scored.len(), "venue", "venues"), query.trim()));
    for (position, s) in scored.iter().enumerate() {
        Status::ranked(position + 1, s.name, &format!("{:.1} points", s.score));
    }
    Ok(())
}
