mod cli;
mod cmd;
mod logging;
mod signal;
mod web;

use clap::Parser;
use cli::{Commands, ConfigAction};
use fomezero::config::{self, Config};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fomezero")]
#[command(version)]
#[command(about = "Restaurant marketplace dashboard: metrics, country/city rankings and a map", long_about = None)]
struct Cli {
    /// Processed restaurant table (overrides the `data` config key)
    #[arg(long, global = true, value_name = "FILE")]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init(args) => cmd::init::run(&args),
        Commands::Config { action } => match action {
            ConfigAction::Validate => cmd::config::validate(),
            ConfigAction::Show => cmd::config::show(),
        },
        command => match load_config(cli.data) {
            Ok(cfg) => {
                logging::init(&cfg.log_level);
                dispatch(command, &cfg)
            }
            Err(code) => Err(code),
        },
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}

fn load_config(data_override: Option<PathBuf>) -> Result<Config, i32> {
    let discovery = config::discover();
    let mut cfg = config::load(&discovery).map_err(|e| {
        eprint!("{}", e.format_cargo_style());
        1
    })?;

    if let Some(data) = data_override {
        cfg.data = config::loader::expand_path(&data);
    }
    Ok(cfg)
}

fn dispatch(command: Commands, cfg: &Config) -> Result<(), i32> {
    match command {
        Commands::Metrics(args) => cli::query::metrics(cfg, &args),
        Commands::Report(args) => cli::query::report(cfg, &args),
        Commands::Reports(args) => cli::query::reports(cfg, &args),
        Commands::Countries(args) => cli::query::countries(cfg, &args),
        Commands::Map(args) => cli::query::map(cfg, &args),
        Commands::Export(args) => cli::export::run(cfg, &args),
        Commands::Web(args) => web::run(args, cfg),
        Commands::Init(_) | Commands::Config { .. } => Ok(()),
    }
}
