//! CLI subcommand infrastructure for fomezero.
//!
//! Provides subcommand definitions for querying the table, serving the
//! dashboard, and config management.

pub mod export;
pub mod query;

use clap::{Args, Subcommand};
use fomezero::report::ReportKind;
use std::path::PathBuf;

/// Available subcommands for fomezero.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the headline figures (whole table, ignores any selection)
    Metrics(OutputArgs),

    /// Run one report for a country selection
    Report(ReportArgs),

    /// Run every report for a country selection
    Reports(SelectionArgs),

    /// List the countries present in the table
    Countries(OutputArgs),

    /// Emit map markers (JSON) for a country selection
    Map(SelectionArgs),

    /// Write the full table with `;` as the delimiter
    Export(ExportArgs),

    /// Start browser-based dashboard
    Web(WebArgs),

    /// Initialize a new fomezero.yaml config file
    Init(InitArgs),

    /// Config file commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Output format switch shared by read-only commands.
#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Output JSON instead of a human-readable table
    #[arg(long)]
    pub json: bool,
}

/// Country selection shared by report commands.
#[derive(Args, Debug)]
pub struct SelectionArgs {
    /// Country to include (repeatable). Defaults to the configured list.
    #[arg(short = 'c', long = "country", value_name = "COUNTRY")]
    pub countries: Vec<String>,

    /// Select nothing (every report comes back empty)
    #[arg(long, conflicts_with = "countries")]
    pub none: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for the report subcommand.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Report to run
    #[arg(value_enum)]
    pub kind: ReportKind,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

/// Arguments for the export subcommand.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file (stdout when omitted)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the web subcommand.
#[derive(Args, Debug)]
pub struct WebArgs {
    /// Bind host (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (overrides config)
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Verbose startup output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Arguments for the init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite existing config file
    #[arg(long)]
    pub force: bool,
}

/// Config subcommand actions.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the config file
    Validate,
    /// Show effective configuration
    Show,
}
