//! Config loading for fomezero.
//!
//! Loads and validates YAML config files with path expansion.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::discovery::DiscoveryResult;
use crate::config::error::ConfigError;
use crate::config::types::{Config, RawConfig};

/// Expand tilde in path to home directory.
///
/// Handles the following cases:
/// - `~/foo` -> `/home/user/foo`
/// - `/absolute/path` -> unchanged
/// - `relative/path` -> unchanged
pub fn expand_path(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();

    if let Some(rest) = path_str.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    } else if path_str == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }

    path.to_path_buf()
}

/// Load and parse a YAML config file.
///
/// Returns the parsed RawConfig or a ConfigError with location and suggestions.
fn load_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    // A file holding only comments is an empty config.
    if content
        .lines()
        .all(|l| l.trim().is_empty() || l.trim_start().starts_with('#'))
    {
        return Ok(RawConfig::default());
    }

    serde_saphyr::from_str(&content)
        .map_err(|e| ConfigError::from_parse_error(path.to_path_buf(), e))
}

/// Overlay the fields set in `raw` onto `config`.
///
/// Relative data paths are resolved against the directory holding the
/// config file.
fn apply(config: &mut Config, raw: RawConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(name) = raw.name {
        config.name = Some(name);
    }

    if let Some(data) = raw.data {
        let expanded = expand_path(&data);
        config.data = match path.parent() {
            Some(dir) if expanded.is_relative() => dir.join(expanded),
            _ => expanded,
        };
    }

    if let Some(countries) = raw.default_countries {
        if let Some(blank) = countries.iter().position(|c| c.trim().is_empty()) {
            return Err(ConfigError::Validation {
                path: path.to_path_buf(),
                message: format!("default_countries[{}] is empty", blank),
            });
        }
        config.default_countries = countries;
    }

    if let Some(size) = raw.cache_size {
        if size == 0 {
            return Err(ConfigError::Validation {
                path: path.to_path_buf(),
                message: "cache_size must be at least 1".to_string(),
            });
        }
        config.cache_size = size;
    }

    if let Some(level) = raw.log_level {
        config.log_level = level;
    }

    if let Some(web) = raw.web {
        if let Some(host) = web.host {
            config.web.host = host;
        }
        if let Some(port) = web.port {
            config.web.port = port;
        }
    }

    Ok(())
}

/// Load config from a single file over defaults (closest-wins semantics
/// for config commands).
pub fn load_single_file(path: &Path) -> Result<Config, ConfigError> {
    let mut config = Config::default();
    apply(&mut config, load_file(path)?, path)?;
    Ok(config)
}

/// Load config from discovered config files.
///
/// Global config is applied first, then the project config overrides it
/// field by field. Returns defaults if no config files exist.
pub fn load(discovery: &DiscoveryResult) -> Result<Config, ConfigError> {
    let mut config = Config::default();

    if let Some(global_path) = &discovery.global_config {
        let raw = load_file(global_path)?;
        apply(&mut config, raw, global_path)?;
    }

    if let Some(project_path) = &discovery.project_config {
        let raw = load_file(project_path)?;
        apply(&mut config, raw, project_path)?;
    }

    Ok(config)
}
