//! Config types for fomezero.
//!
//! Defines structures for parsing and representing configuration files.

use serde::Deserialize;
use std::path::PathBuf;

/// Countries shown when the user has not picked any.
pub const DEFAULT_COUNTRIES: &[&str] = &[
    "Brazil",
    "England",
    "Qatar",
    "South Africa",
    "Canada",
    "Australia",
];

/// Where the processing step writes the cleaned table.
pub const DEFAULT_DATA_PATH: &str = "./data/processed/data.csv";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8421;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Field names accepted at the top level (used for typo suggestions).
pub const KNOWN_FIELDS: &[&str] = &[
    "name",
    "data",
    "default_countries",
    "cache_size",
    "log_level",
    "web",
    "host",
    "port",
];

/// Raw config file structure (used for parsing).
///
/// This struct directly mirrors the YAML config file structure.
/// Unknown fields are rejected with an error.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    /// Dashboard name (optional).
    pub name: Option<String>,
    /// Path to the processed CSV (may contain tilde).
    pub data: Option<PathBuf>,
    /// Countries preselected in the dashboard.
    pub default_countries: Option<Vec<String>>,
    /// Capacity of the report memo.
    pub cache_size: Option<usize>,
    /// Default tracing filter when `FOMEZERO_LOG` is unset.
    pub log_level: Option<String>,
    /// Web server settings.
    pub web: Option<RawWebConfig>,
}

/// Raw `web:` section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawWebConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Resolved web server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Effective config after merging global and project files over defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Dashboard name from the project config (if present).
    pub name: Option<String>,
    /// Expanded path to the processed CSV.
    pub data: PathBuf,
    pub default_countries: Vec<String>,
    pub cache_size: usize,
    pub log_level: String,
    pub web: WebConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: None,
            data: PathBuf::from(DEFAULT_DATA_PATH),
            default_countries: DEFAULT_COUNTRIES.iter().map(|s| s.to_string()).collect(),
            cache_size: crate::cache::DEFAULT_CAPACITY,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            web: WebConfig::default(),
        }
    }
}
