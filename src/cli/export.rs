use super::ExportArgs;
use anyhow::{Context, Result};
use fomezero::config::Config;
use fomezero::export;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing::info;

/// Write the processed table with `;` delimiters to a file or stdout.
pub fn run(config: &Config, args: &ExportArgs) -> Result<(), i32> {
    match write_export(config, args) {
        Ok(rows) => {
            info!(rows, source = %config.data.display(), "table exported");
            Ok(())
        }
        Err(e) => {
            eprintln!("error: {:#}", e);
            Err(1)
        }
    }
}

fn write_export(config: &Config, args: &ExportArgs) -> Result<usize> {
    let rows = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            let rows = export::export_file(&config.data, &mut out)?;
            out.flush()
                .with_context(|| format!("cannot write {}", path.display()))?;
            rows
        }
        None => export::export_file(&config.data, io::stdout().lock())?,
    };
    Ok(rows)
}
