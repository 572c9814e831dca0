//! Cuisines command - cuisine autocomplete without a catalog

use super::Context;
use anyhow::Result;
use dinefind_cli::Status;

pub fn run(ctx: &Context, partial: &str) -> Result<()> {
    let cuisines = ctx.engine.cuisine_suggestions(partial);

    if ctx.format.is_json() {
        return ctx.print_json(&cuisines);
    }

    if cuisines.is_empty() {
        Status::warning(&format!("No cuisine close to \"{}\"", partial.trim()));
        return Ok(());
    }
    for cuisine in cuisines {
        println!("{}", cuisine);
    }
    Ok(())
}
