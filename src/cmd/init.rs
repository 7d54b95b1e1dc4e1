use crate::cli::InitArgs;
use colored::Colorize;
use fomezero::config::discovery::PROJECT_CONFIG_NAME;
use fomezero::config::types::{DEFAULT_COUNTRIES, DEFAULT_DATA_PATH, DEFAULT_HOST, DEFAULT_PORT};
use std::fs;
use std::path::Path;

/// Starter config written by `fomezero init`.
pub fn template() -> String {
    let countries = DEFAULT_COUNTRIES
        .iter()
        .map(|c| format!("  - {}\n", c))
        .collect::<String>();

    format!(
        "# fomezero dashboard configuration\n\
         name: Fome Zero\n\
         \n\
         # Processed restaurant table (relative paths resolve from this file)\n\
         data: {}\n\
         \n\
         # Countries preselected when the user has made no choice\n\
         default_countries:\n{}\
         \n\
         web:\n  host: {}\n  port: {}\n",
        DEFAULT_DATA_PATH, countries, DEFAULT_HOST, DEFAULT_PORT
    )
}

/// Write `fomezero.yaml` into the current directory.
pub fn run(args: &InitArgs) -> Result<(), i32> {
    write_config(Path::new(PROJECT_CONFIG_NAME), args.force)
}

fn write_config(path: &Path, force: bool) -> Result<(), i32> {
    if path.exists() && !force {
        eprintln!(
            "error: {} already exists (use --force to overwrite)",
            path.display()
        );
        return Err(1);
    }

    if let Err(e) = fs::write(path, template()) {
        eprintln!("error: cannot write {}: {}", path.display(), e);
        return Err(1);
    }

    println!("Created {}", path.display().to_string().green());
    Ok(())
}
