//! Command implementations

pub mod aliases;
pub mod cuisines;
pub mod index;
pub mod relevance;
pub mod search;
pub mod suggest;

use anyhow::Result;
use dinefind_cli::OutputFormat;
use dinefind_search::SearchEngine;
use dinefind_telemetry::{Timer, metrics};
use serde::Serialize;
use std::time::{Duration, Instant};

/// State shared by every command.
pub struct Context {
    pub engine: SearchEngine,
    pub format: OutputFormat,
    pub metrics_enabled: bool,
}

impl Context {
    /// Print `value` as pretty JSON on stdout.
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Run `f`, recording its duration under `metric`.
    pub fn timed<T>(&self, metric: &str, f: impl FnOnce() -> T) -> (T, Duration) {
        let start = Instant::now();
        let timer = self.metrics_enabled.then(|| Timer::start(metric));
        let value = f();
        if let Some(timer) = timer {
            timer.stop();
        }
        (value, start.elapsed())
    }

    /// Set the gauge `metric` to `value`.
    pub fn gauge(&self, metric: &str, value: u64) {
        if self.metrics_enabled {
            metrics().gauge(metric, value);
        }
    }

    /// Add `value` to the counter `metric`.
    pub fn count(&self, metric: &str, value: u64) {
        if self.metrics_enabled {
            metrics().increment_by(metric, value);
        }
    }
}
