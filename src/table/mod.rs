//! The processed restaurant table.
//!
//! Loaded once per request from the CSV written by the processing step and
//! treated as immutable input by every report.

pub mod error;
pub mod record;

pub use error::TableError;
pub use record::{NumericColumn, Restaurant, TextColumn};

use std::collections::{BTreeSet, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Upper bound of the rating scale.
pub const MAX_RATING: f64 = 5.0;

/// In-memory record table.
#[derive(Debug, Clone, Default)]
pub struct RecordTable {
    rows: Vec<Restaurant>,
}

impl RecordTable {
    /// Build a table from rows already in memory (no validation).
    pub fn from_rows(rows: Vec<Restaurant>) -> Self {
        Self { rows }
    }

    /// Read and validate the processed CSV at `path`.
    ///
    /// The file handle is dropped as soon as every row is materialized.
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let file = File::open(path).map_err(|e| TableError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let table = Self::from_reader(file, path)?;
        debug!(path = %path.display(), rows = table.len(), "loaded record table");
        Ok(table)
    }

    /// Decode a comma-delimited table from any reader.
    ///
    /// `origin` is only used to label errors.
    pub fn from_reader<R: Read>(reader: R, origin: &Path) -> Result<Self, TableError> {
        let origin = origin.to_path_buf();
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|e| TableError::from_csv(origin.clone(), e))?
            .clone();

        let mut rows = Vec::new();
        let mut record = csv::StringRecord::new();
        loop {
            match rdr.read_record(&mut record) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => return Err(TableError::from_csv(origin, e)),
            }
            let line = record.position().map(|p| p.line());
            let row: Restaurant = record
                .deserialize(Some(&headers))
                .map_err(|e| TableError::from_csv(origin.clone(), e))?;
            validate_row(&row).map_err(|message| TableError::Invalid {
                path: origin.clone(),
                line,
                message,
            })?;
            rows.push(row);
        }

        let duplicates = count_duplicate_ids(&rows);
        if duplicates > 0 {
            warn!(
                path = %origin.display(),
                duplicates,
                "restaurant_id is not unique across the table"
            );
        }

        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Restaurant] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct countries present in the table, sorted.
    pub fn countries(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self.rows.iter().map(|r| r.country.as_str()).collect();
        set.into_iter().collect()
    }
}

fn validate_row(row: &Restaurant) -> Result<(), String> {
    if row.country.is_empty() {
        return Err(format!(
            "restaurant {} has an empty country",
            row.restaurant_id
        ));
    }
    if row.city.is_empty() {
        return Err(format!("restaurant {} has an empty city", row.restaurant_id));
    }
    if !(0.0..=MAX_RATING).contains(&row.aggregate_rating) {
        return Err(format!(
            "restaurant {} has aggregate_rating {} outside 0..=5",
            row.restaurant_id, row.aggregate_rating
        ));
    }
    for (column, value) in [
        ("average_cost_for_two", row.average_cost_for_two),
        ("latitude", row.latitude),
        ("longitude", row.longitude),
    ] {
        if !value.is_finite() {
            return Err(format!(
                "restaurant {} has non-finite {} ({})",
                row.restaurant_id, column, value
            ));
        }
    }
    Ok(())
}

fn count_duplicate_ids(rows: &[Restaurant]) -> usize {
    let mut seen = HashSet::with_capacity(rows.len());
    rows.iter()
        .filter(|r| !seen.insert(r.restaurant_id))
        .count()
}
