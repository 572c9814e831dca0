//! dinefind - venue catalog search from the command line
//!
//! Ranked fuzzy search, autocomplete suggestions and cuisine lookup over a
//! JSON catalog file.

use anyhow::Result;
use clap::{Parser, Subcommand};
use dinefind_cli::{OutputFormat, Status};
use dinefind_geo::Coordinate;
use dinefind_search::SearchEngine;
use std::path::PathBuf;
use std::process::ExitCode;

mod catalog;
mod commands;
mod config;

use commands::{Context, aliases, cuisines, index, relevance, search, suggest};
use config::LoadedConfig;

/// Venue catalog search
#[derive(Parser)]
#[command(name = "dinefind")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Configuration file (defaults to ./.dinefind.toml when present)
    #[arg(long, global = true, env = "DINEFIND_CONFIG")]
    config: Option<PathBuf>,

    /// Print collected metrics to stderr on exit
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank catalog venues against a query
    Search {
        /// Free-text query
        query: String,

        /// Catalog file (JSON array of venues)
        #[arg(short, long)]
        catalog: PathBuf,

        /// Your latitude, for proximity ranking
        #[arg(long, requires = "lng", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Your longitude, for proximity ranking
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lng: Option<f64>,

        /// Maximum results (defaults to the configured limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Autocomplete a partial query
    Suggest {
        /// Partial query text
        partial: String,

        /// Catalog file (JSON array of venues)
        #[arg(short, long)]
        catalog: PathBuf,
    },

    /// List canonical cuisines mentioned in free text
    Aliases {
        /// Text to scan for cuisine names and aliases
        text: String,
    },

    /// Autocomplete a cuisine name
    Cuisines {
        /// Partial cuisine name
        partial: String,
    },

    /// Quick tiered relevance without fuzzy matching
    Relevance {
        /// Free-text query
        query: String,

        /// Catalog file (JSON array of venues)
        #[arg(short, long)]
        catalog: PathBuf,

        /// Maximum venues to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Build the field index and print its statistics
    Index {
        /// Catalog file (JSON array of venues)
        #[arg(short, long)]
        catalog: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Status::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let loaded = LoadedConfig::load(cli.config.as_deref())?;
    let mut telemetry = loaded.config.telemetry.clone();
    if cli.verbose {
        telemetry = telemetry.verbose();
    }
    let _guard = dinefind_telemetry::init_with_config(&telemetry)?;

    if let Some(path) = &loaded.path {
        tracing::debug!(path = %path.display(), "Using config file");
    }

    let ctx = Context {
        engine: SearchEngine::new(loaded.config.search)?,
        format: cli.format,
        metrics_enabled: cli.metrics || telemetry.metrics_enabled,
    };

    match cli.command {
        Commands::Search { query, catalog, lat, lng, limit } => {
            let user = lat.zip(lng).map(Coordinate::from);
            search::run(&ctx, &query, &catalog, user, limit)
        }
        Commands::Suggest { partial, catalog } => suggest::run(&ctx, &partial, &catalog),
        Commands::Aliases { text } => aliases::run(&ctx, &text),
        Commands::Cuisines { partial } => cuisines::run(&ctx, &partial),
        Commands::Relevance { query, catalog, limit } => relevance::run(&ctx, &query, &catalog, limit),
        Commands::Index { catalog } => index::run(&ctx, &catalog),
    }?;

    if cli.metrics {
        eprintln!("{}", serde_json::to_string_pretty(&dinefind_telemetry::metrics().export_json())?);
    }
    Ok(())
}
