//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use clap::ValueEnum;
use owo_colors::OwoColorize;

/// How a command prints its result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable text
    #[default]
    Text,
    /// One JSON document on stdout
    Json,
}

impl OutputFormat {
    /// True for [`OutputFormat::Json`]
    pub fn is_json(self) -> bool {
        self == OutputFormat::Json
    }
}

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "Error:".red().bold(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }

    /// Print one ranked line: position, text and a dimmed detail
    pub fn ranked(position: usize, text: &str, detail: &str) {
        println!("{:>3}. {} {}", position, text.bold(), detail.dimmed());
    }

    /// Print a key/value line
    pub fn field(key: &str, value: &str) {
        println!("  {:<14} {}", format!("{}:", key).dimmed(), value);
    }
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 0.001 {
        format!("{}µs", duration.as_micros())
    } else if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs % 60.0;
        format!("{}m {:.0}s", mins, remaining_secs)
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Format a distance in kilometres for display
///
/// Metres below 1 km, one decimal below 10 km, whole kilometres beyond.
pub fn format_distance(km: Option<f64>) -> String {
    match km {
        Some(km) if km.is_finite() && km >= 0.0 => {
            if km < 1.0 {
                format!("{}m away", (km * 1000.0).round() as u64)
            } else if km < 10.0 {
                format!("{:.1}km away", km)
            } else {
                format!("{:.0}km away", km)
            }
        }
        _ => "Distance unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_format_duration_micros() {
        assert_eq!(format_duration(Duration::from_micros(250)), "250µs");
    }

    #[test]
    fn test_format_duration_ms() {
        let d = Duration::from_millis(500);
        assert_eq!(format_duration(d), "500ms");
    }

    #[test]
    fn test_format_duration_secs() {
        let d = Duration::from_secs_f32(5.5);
        assert_eq!(format_duration(d), "5.5s");
    }

    #[test]
    fn test_format_duration_mins() {
        let d = Duration::from_secs(125);
        assert_eq!(format_duration(d), "2m 5s");
    }

    #[test]
    fn test_format_count_singular() {
        assert_eq!(format_count(1, "venue", "venues"), "1 venue");
    }

    #[test]
    fn test_format_count_plural() {
        assert_eq!(format_count(5, "venue", "venues"), "5 venues");
        assert_eq!(format_count(0, "venue", "venues"), "0 venues");
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(Some(0.2504)), "250m away");
        assert_eq!(format_distance(Some(3.46)), "3.5km away");
        assert_eq!(format_distance(Some(68.4)), "68km away");
        assert_eq!(format_distance(None), "Distance unknown");
        assert_eq!(format_distance(Some(f64::NAN)), "Distance unknown");
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
        assert!(OutputFormat::Json.is_json());
    }
}
