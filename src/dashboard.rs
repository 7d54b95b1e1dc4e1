//! Request-scoped access to the record table for long-running front ends.
//!
//! The table is re-read whenever the data file changes on disk (size or
//! modification time); otherwise the copy already in memory is reused.
//! Memoized reports are dropped on every reload so a cached answer always
//! equals a full recomputation.

use crate::cache::ReportCache;
use crate::engine::Selection;
use crate::map::{self, MapMarker};
use crate::metrics::Summary;
use crate::report::{Report, ReportKind};
use crate::table::{RecordTable, TableError};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fingerprint {
    modified: Option<SystemTime>,
    len: u64,
}

struct Loaded {
    fingerprint: Fingerprint,
    table: Arc<RecordTable>,
}

pub struct Dashboard {
    data_path: PathBuf,
    loaded: Option<Loaded>,
    reports: ReportCache,
}

impl Dashboard {
    pub fn new(data_path: PathBuf, cache_size: usize) -> Self {
        Self {
            data_path,
            loaded: None,
            reports: ReportCache::new(cache_size),
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Current table, reloading it if the file changed since the last call.
    pub fn table(&mut self) -> Result<Arc<RecordTable>, TableError> {
        let meta = fs::metadata(&self.data_path).map_err(|e| TableError::Io {
            path: self.data_path.clone(),
            source: e,
        })?;
        let fingerprint = Fingerprint {
            modified: meta.modified().ok(),
            len: meta.len(),
        };

        if let Some(loaded) = &self.loaded {
            if fingerprint.modified.is_some() && loaded.fingerprint == fingerprint {
                return Ok(Arc::clone(&loaded.table));
            }
        }

        let table = Arc::new(RecordTable::load(&self.data_path)?);
        info!(
            path = %self.data_path.display(),
            rows = table.len(),
            "record table (re)loaded"
        );
        self.reports.clear();
        self.loaded = Some(Loaded {
            fingerprint,
            table: Arc::clone(&table),
        });
        Ok(table)
    }

    pub fn report(&mut self, kind: ReportKind, selection: &Selection) -> Result<Report, TableError> {
        let table = self.table()?;
        Ok(self
            .reports
            .get_or_compute(kind, selection, || kind.run(&table, selection)))
    }

    pub fn summary(&mut self) -> Result<Summary, TableError> {
        let table = self.table()?;
        Ok(Summary::compute(&table))
    }

    pub fn markers(&mut self, selection: &Selection) -> Result<Vec<MapMarker>, TableError> {
        let table = self.table()?;
        Ok(map::markers(&table, selection))
    }

    pub fn countries(&mut self) -> Result<Vec<String>, TableError> {
        let table = self.table()?;
        Ok(table.countries().into_iter().map(str::to_string).collect())
    }

    /// (hits, misses) of the report memo.
    pub fn cache_stats(&self) -> (u64, u64) {
        self.reports.stats()
    }
}
