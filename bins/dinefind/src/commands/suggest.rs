//! Suggest command - autocomplete for a partial query

use super::Context;
use crate::catalog::load_catalog;
use anyhow::Result;
use dinefind_cli::Status;
use dinefind_search::SuggestionKind;
use owo_colors::OwoColorize;
use std::path::Path;

/// Print suggestions for `partial`
pub fn run(ctx: &Context, partial: &str, catalog: &Path) -> Result<()> {
    let catalog = load_catalog(catalog)?;
    let suggestions = ctx.engine.suggest(partial, &catalog);

    if ctx.format.is_json() {
        return ctx.print_json(&suggestions);
    }

    if suggestions.is_empty() {
        Status::warning(&format!("No suggestions for \"{}\"", partial.trim()));
        return Ok(());
    }

    Status::header(&format!("Suggestions for \"{}\"", partial.trim()));
    for suggestion in &suggestions {
        let kind = match suggestion.kind {
            SuggestionKind::Venue => "venue",
            SuggestionKind::Cuisine => "cuisine",
            SuggestionKind::Tag => "tag",
        };
        println!("  {:<9} {}", format!("[{}]", kind).dimmed(), suggestion.label);
    }
    Ok(())
}
