use crate::engine::Selection;
use crate::report::{Report, ReportKind};
use lru::LruCache;
use std::num::NonZeroUsize;

/// Default cache capacity (number of memoized reports)
pub const DEFAULT_CAPACITY: usize = 64;

/// LRU memo of computed reports keyed by (report, selection).
///
/// Results are only valid for the table they were computed from; the owner
/// must call [`ReportCache::clear`] whenever the table is reloaded.
pub struct ReportCache {
    cache: LruCache<(ReportKind, Selection), Report>,
    hits: u64,
    misses: u64,
}

impl ReportCache {
    /// Create a new report cache with the specified capacity
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Get a report from cache, or compute it using the provided closure
    pub fn get_or_compute<F>(
        &mut self,
        kind: ReportKind,
        selection: &Selection,
        compute: F,
    ) -> Report
    where
        F: FnOnce() -> Report,
    {
        let key = (kind, selection.clone());
        if let Some(report) = self.cache.get(&key) {
            self.hits += 1;
            return report.clone();
        }

        self.misses += 1;
        let report = compute();
        self.cache.put(key, report.clone());
        report
    }

    /// Drop every memoized report
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// (hits, misses) since creation
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}

impl Default for ReportCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
