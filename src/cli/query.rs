//! Read-only commands over the record table: metrics, reports, countries
//! and map markers.

use super::{OutputArgs, ReportArgs, SelectionArgs};
use colored::Colorize;
use fomezero::config::Config;
use fomezero::engine::Selection;
use fomezero::map;
use fomezero::metrics::Summary;
use fomezero::report::{Report, ReportKind};
use fomezero::table::RecordTable;
use serde::Serialize;
use tracing::warn;

impl SelectionArgs {
    /// Explicit countries, else nothing with `--none`, else the configured
    /// defaults.
    pub fn resolve(&self, config: &Config) -> Selection {
        if self.none {
            Selection::new()
        } else if self.countries.is_empty() {
            config.default_countries.iter().cloned().collect()
        } else {
            self.countries.iter().cloned().collect()
        }
    }
}

fn load_table(config: &Config) -> Result<RecordTable, i32> {
    RecordTable::load(&config.data).map_err(|e| {
        eprintln!("{}", e);
        1
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<(), i32> {
    match serde_json::to_string_pretty(value) {
        Ok(body) => {
            println!("{}", body);
            Ok(())
        }
        Err(e) => {
            eprintln!("error: failed to encode JSON: {}", e);
            Err(1)
        }
    }
}

/// Log selected countries the table does not contain.
fn warn_unknown(table: &RecordTable, selection: &Selection) {
    for unknown in selection.unknown_in(&table.countries()) {
        match unknown.suggestion {
            Some(s) => warn!(
                country = %unknown.name,
                "country not in table, did you mean '{}'?",
                s
            ),
            None => warn!(country = %unknown.name, "country not in table"),
        }
    }
}

pub fn metrics(config: &Config, args: &OutputArgs) -> Result<(), i32> {
    let table = load_table(config)?;
    let summary = Summary::compute(&table);

    if args.json {
        return print_json(&summary);
    }

    for (label, value) in summary.widgets() {
        println!("{:>18}  {}", label.cyan(), value.bold());
    }
    Ok(())
}

pub fn report(config: &Config, args: &ReportArgs) -> Result<(), i32> {
    let table = load_table(config)?;
    let selection = args.selection.resolve(config);
    warn_unknown(&table, &selection);

    let report = args.kind.run(&table, &selection);
    if args.selection.output.json {
        return print_json(&report);
    }

    print_report(&report);
    Ok(())
}

pub fn reports(config: &Config, args: &SelectionArgs) -> Result<(), i32> {
    let table = load_table(config)?;
    let selection = args.resolve(config);
    warn_unknown(&table, &selection);

    let all: Vec<Report> = ReportKind::ALL
        .into_iter()
        .map(|kind| kind.run(&table, &selection))
        .collect();

    if args.output.json {
        return print_json(&all);
    }

    for (i, report) in all.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_report(report);
    }
    Ok(())
}

pub fn countries(config: &Config, args: &OutputArgs) -> Result<(), i32> {
    let table = load_table(config)?;
    let countries = table.countries();

    if args.json {
        return print_json(&countries);
    }

    for country in countries {
        let marker = if config.default_countries.iter().any(|c| c == country) {
            "*".green().to_string()
        } else {
            " ".to_string()
        };
        println!("{} {}", marker, country);
    }
    Ok(())
}

pub fn map(config: &Config, args: &SelectionArgs) -> Result<(), i32> {
    let table = load_table(config)?;
    let selection = args.resolve(config);
    warn_unknown(&table, &selection);

    print_json(&map::markers(&table, &selection))
}

fn print_report(report: &Report) {
    println!("{}", report.chart.title.bold());
    println!(
        "{}",
        format!("{} / {}", report.chart.x_label, report.chart.y_label).dimmed()
    );

    if report.entries.is_empty() {
        println!("  {}", "(no data for this selection)".dimmed());
        return;
    }

    let names: Vec<String> = report
        .entries
        .iter()
        .map(|e| match &e.key.city {
            Some(city) => format!("{} ({})", city, e.key.country),
            None => e.key.country.clone(),
        })
        .collect();
    let width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0);

    for (rank, (entry, name)) in report.entries.iter().zip(&names).enumerate() {
        println!(
            "{:>3}. {:<width$}  {}",
            rank + 1,
            name,
            entry.text.yellow(),
            width = width
        );
    }
}
