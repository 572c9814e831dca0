//! Configuration file loading

use anyhow::{Context, Result};
use dinefind_search::SearchConfig;
use dinefind_telemetry::TelemetryConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Locations searched, in order, when `--config` is not given.
const CANDIDATES: &[&str] = &[".dinefind.toml", "dinefind.toml", ".config/dinefind.toml"];

/// Contents of a `dinefind.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Loaded configuration and the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub path: Option<PathBuf>,
}

impl LoadedConfig {
    /// Load `path`, or the first existing candidate file, or defaults.
    ///
    /// The search section is validated so a bad file fails before any
    /// catalog is read.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).or_else(find_config_file);

        let config = match &path {
            Some(p) => load_config_file(p)?,
            None => AppConfig::default(),
        };
        config
            .search
            .validate()
            .with_context(|| match &path {
                Some(p) => format!("Invalid settings in {}", p.display()),
                None => "Invalid default settings".to_string(),
            })?;

        Ok(Self { config, path })
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    CANDIDATES.iter().map(PathBuf::from).find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    toml::from_str(&content).with_context(|| format!("Failed to parse config file {}", path.display()))
}
