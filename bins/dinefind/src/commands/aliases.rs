//! Aliases command - canonical cuisines mentioned in free text

use super::Context;
use anyhow::Result;
use dinefind_cli::Status;

pub fn run(ctx: &Context, text: &str) -> Result<()> {
    let cuisines = ctx.engine.resolve_cuisine_aliases(text);

    if ctx.format.is_json() {
        return ctx.print_json(&cuisines);
    }

    if cuisines.is_empty() {
        Status::warning(&format!("No cuisine recognised in \"{}\"", text.trim()));
    } else {
        let names: Vec<&str> = cuisines.into_iter().collect();
        Status::success(&names.join(", "));
    }
    Ok(())
}
