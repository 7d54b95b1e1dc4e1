//! Config discovery for fomezero.
//!
//! Walks parent directories to find `fomezero.yaml` and checks for global config
//! at `~/.config/fomezero/config.yaml`.

use std::path::{Path, PathBuf};

/// Project config filename to search for in parent directories.
pub const PROJECT_CONFIG_NAME: &str = "fomezero.yaml";

/// Global config filename within the fomezero config directory.
pub const GLOBAL_CONFIG_NAME: &str = "config.yaml";

/// Paths of the config files that were found.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryResult {
    /// Full path to the project config file (`fomezero.yaml`).
    pub project_config: Option<PathBuf>,
    /// Full path to the global config file (`~/.config/fomezero/config.yaml`).
    pub global_config: Option<PathBuf>,
}

impl DiscoveryResult {
    /// The config that wins for single-file commands: project, else global.
    pub fn effective_config(&self) -> Option<&Path> {
        self.project_config
            .as_deref()
            .or(self.global_config.as_deref())
    }
}

/// Discover config files starting from the current working directory.
pub fn discover() -> DiscoveryResult {
    let global = dirs::config_dir().map(|dir| dir.join("fomezero").join(GLOBAL_CONFIG_NAME));

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.canonicalize().unwrap_or(dir),
        Err(_) => {
            return DiscoveryResult {
                global_config: global.filter(|p| is_file(p)),
                ..Default::default()
            };
        }
    };

    discover_from(&cwd, global.as_deref())
}

/// Walk `start` and its ancestors looking for `fomezero.yaml`.
///
/// `global` is the candidate global config path; it is reported only if it
/// exists.
pub fn discover_from(start: &Path, global: Option<&Path>) -> DiscoveryResult {
    DiscoveryResult {
        project_config: start
            .ancestors()
            .map(|dir| dir.join(PROJECT_CONFIG_NAME))
            .find(|path| is_file(path)),
        global_config: global.filter(|p| is_file(p)).map(Path::to_path_buf),
    }
}

fn is_file(path: &Path) -> bool {
    path.try_exists().unwrap_or(false) && path.is_file()
}
