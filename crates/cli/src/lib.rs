//! CLI utilities for the dinefind tools
//!
//! Provides shared CLI functionality:
//! - Status lines and number formatting
//! - The `--format` switch shared by every command
//! - Progress spinners

#![warn(missing_docs)]

pub mod output;
pub mod progress;

pub use output::{OutputFormat, Status, format_count, format_distance, format_duration};
