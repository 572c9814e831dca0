//! Search command - rank a catalog against a query

use super::Context;
use crate::catalog::load_catalog;
use anyhow::{Result, ensure};
use dinefind_cli::{Status, format_count, format_distance, format_duration};
use dinefind_geo::{Coordinate, haversine_distance};
use dinefind_search::{CatalogRecord, RankedResult, SearchResult};
use dinefind_telemetry::names;
use owo_colors::OwoColorize;
use std::path::Path;

/// Run a search
pub fn run(ctx: &Context, query: &str, catalog: &Path, user: Option<Coordinate>, limit: Option<usize>) -> Result<()> {
    let limit = limit.unwrap_or(ctx.engine.config().default_limit);
    ensure!(limit >= 1, "--limit must be at least 1");

    let catalog = load_catalog(catalog)?;
    let (index, _) = ctx.timed(names::INDEX_BUILD_MS, || ctx.engine.build_index(&catalog));
    ctx.gauge(names::INDEX_RECORDS, index.len() as u64);

    let (ranked, elapsed) = ctx.timed(names::SEARCH_LATENCY_MS, || ctx.engine.search(query, &catalog, user, limit));
    ctx.count(names::SEARCH_QUERIES, 1);
    ctx.count(names::SEARCH_RESULTS, ranked.total_results as u64);

    if ctx.format.is_json() {
        return ctx.print_json(&ranked);
    }

    print_text(query, &ranked, user.and_then(Coordinate::validated));
    Status::field("Time", &format_duration(elapsed));
    Ok(())
}

fn print_text(query: &str, ranked: &RankedResult<'_>, user: Option<Coordinate>) {
    let title = if query.trim().is_empty() {
        format_count(ranked.total_results, "venue", "venues")
    } else {
        format!("{} for \"{}\"", format_count(ranked.total_results, "result", "results"), query.trim())
    };
    Status::header(&title);

    if ranked.results.is_empty() {
        Status::warning("No venues matched");
    }
    for (position, result) in ranked.results.iter().enumerate() {
        Status::ranked(position + 1, &result.item.name, &detail(result, user));
    }
    if ranked.has_more {
        Status::info(&format!("Showing {} of {}", ranked.results.len(), ranked.total_results));
    }

    if !ranked.suggestions.is_empty() {
        println!();
        println!("{}", "Suggestions".bold());
        for suggestion in &ranked.suggestions {
            println!("  {} {}", "›".dimmed(), suggestion.label);
        }
    }
    println!();
}

fn detail(result: &SearchResult<&CatalogRecord>, user: Option<Coordinate>) -> String {
    let record = result.item;
    let mut parts = Vec::new();
    if !record.category.is_empty() {
        parts.push(record.category.clone());
    }
    if let Some(rating) = record.rating {
        parts.push(format!("★ {:.1} ({})", rating, record.review_count));
    }
    if let (Some(user), Some(venue)) = (user, record.coordinate.and_then(Coordinate::validated)) {
        parts.push(format_distance(Some(haversine_distance(&user, &venue))));
    }
    if let Some(score) = result.score {
        parts.push(format!("score {:.3}", score));
    }
    parts.join(" · ")
}
