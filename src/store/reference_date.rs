//! Reference-date window cache
//!
//! A single-slot cache of the trailing year window, keyed by the latest
//! measurement date it was derived from. Callers pass in the current
//! latest date on every lookup, so an entry is only reused while that
//! date is unchanged and is replaced as soon as it moves.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::analysis::YearWindow;

/// Cache statistics. Passive only, lookups never depend on them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups served from the slot
    pub hits: u64,
    /// Lookups that derived a new window
    pub misses: u64,
}

/// Window cache keyed by the reference date
#[derive(Debug, Default)]
pub struct ReferenceDateCache {
    slot: RwLock<Option<YearWindow>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ReferenceDateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Window for the given latest date, reusing the slot when it matches
    pub fn window_for(&self, reference: NaiveDate) -> YearWindow {
        if let Some(window) = self.cached(reference) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return window;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let window = YearWindow::ending_at(reference);
        tracing::debug!(
            reference = %reference,
            start = %window.start,
            "reference window recomputed"
        );
        *self.slot.write().unwrap_or_else(|e| e.into_inner()) = Some(window);
        window
    }

    fn cached(&self, reference: NaiveDate) -> Option<YearWindow> {
        let slot = self.slot.read().unwrap_or_else(|e| e.into_inner());
        (*slot).filter(|w| w.reference == reference)
    }

    /// Currently cached window, if any
    pub fn current(&self) -> Option<YearWindow> {
        *self.slot.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
