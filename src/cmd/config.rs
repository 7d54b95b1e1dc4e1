//! Config validate and show commands for fomezero.
//!
//! Provides config introspection and validation for CI pipelines and developer debugging.

use colored::Colorize;
use fomezero::config::{self, Config};
use std::path::PathBuf;

/// Get the effective config path (closest wins: project > global).
fn effective_config_path() -> Option<PathBuf> {
    config::discover().effective_config().map(PathBuf::from)
}

/// Validate the effective config file.
///
/// Follows Unix conventions:
/// - Exit 0 with no output on success (quiet success)
/// - Exit 1 with error message to stderr on failure
///
/// Validates:
/// - YAML syntax
/// - Known field names (typo detection)
/// - Data file existence
pub fn validate() -> Result<(), i32> {
    let config_path = match effective_config_path() {
        Some(path) => path,
        None => {
            eprintln!("error: No config found to validate");
            return Err(1);
        }
    };

    match config::load_single_file(&config_path) {
        Ok(cfg) => {
            if cfg.data.try_exists().unwrap_or(false) {
                Ok(())
            } else {
                eprintln!("error: Data file not found: {}", cfg.data.display());
                Err(1)
            }
        }
        Err(e) => {
            eprintln!("{}", e);
            Err(1)
        }
    }
}

/// Show the effective configuration.
///
/// Respects NO_COLOR environment variable via the colored crate.
pub fn show() -> Result<(), i32> {
    match effective_config_path() {
        Some(path) => match config::load_single_file(&path) {
            Ok(cfg) => {
                println!("Using: {}", path.display().to_string().dimmed());
                println!();
                show_config(&cfg);
                Ok(())
            }
            Err(e) => {
                eprintln!("{}", e);
                Err(1)
            }
        },
        None => {
            println!("{}", "No config found. Using defaults.".dimmed());
            println!();
            show_config(&Config::default());
            Ok(())
        }
    }
}

/// Display the config contents with colored output.
fn show_config(cfg: &Config) {
    match &cfg.name {
        Some(name) => println!("{}: {}", "name".cyan(), name.green()),
        None => println!("{}: {}", "name".cyan(), "(not set)".dimmed()),
    }

    let status = if cfg.data.try_exists().unwrap_or(false) {
        String::new()
    } else {
        format!(" {}", "(not found)".red())
    };
    println!(
        "{}: {}{}",
        "data".cyan(),
        cfg.data.display().to_string().yellow(),
        status
    );

    println!("{}: {}", "cache_size".cyan(), cfg.cache_size);
    println!("{}: {}", "log_level".cyan(), cfg.log_level);
    println!("{}:", "web".cyan());
    println!("  {}: {}", "host".blue(), cfg.web.host);
    println!("  {}: {}", "port".blue(), cfg.web.port);

    println!("{}:", "default_countries".cyan());
    if cfg.default_countries.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for country in &cfg.default_countries {
        println!("  - {}", country.green());
    }
}
