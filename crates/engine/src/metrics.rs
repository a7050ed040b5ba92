//! Ordering service counters
//!
//! Counters use Relaxed ordering: they are observational only and do not
//! synchronize any other memory.

use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters owned by an `OrderingService`
#[derive(Debug, Default)]
pub struct ServiceMetrics {
    creates: AtomicU64,
    updates: AtomicU64,
    deletes: AtomicU64,
    cascades: AtomicU64,
    widgets_shifted: AtomicU64,
    rejected: AtomicU64,
}

impl ServiceMetrics {
    /// All counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_create(&self, shifted: usize) {
        self.creates.fetch_add(1, Ordering::Relaxed);
        self.record_shift(shifted);
    }

    pub(crate) fn record_update(&self, shifted: usize) {
        self.updates.fetch_add(1, Ordering::Relaxed);
        self.record_shift(shifted);
    }

    pub(crate) fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    fn record_shift(&self, shifted: usize) {
        if shifted > 0 {
            self.cascades.fetch_add(1, Ordering::Relaxed);
            self.widgets_shifted
                .fetch_add(shifted as u64, Ordering::Relaxed);
        }
    }

    /// Current values
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            creates: self.creates.load(Ordering::Relaxed),
            updates: self.updates.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
            cascades: self.cascades.load(Ordering::Relaxed),
            widgets_shifted: self.widgets_shifted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the service counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Successful creates
    pub creates: u64,
    /// Successful updates
    pub updates: u64,
    /// Deletes that removed a widget
    pub deletes: u64,
    /// Creates/updates that had to shift at least one widget
    pub cascades: u64,
    /// Total widgets moved by cascades
    pub widgets_shifted: u64,
    /// Operations rejected with an error
    pub rejected: u64,
}

impl MetricsSnapshot {
    /// Average widgets moved per cascade
    pub fn mean_cascade_depth(&self) -> f64 {
        if self.cascades > 0 {
            self.widgets_shifted as f64 / self.cascades as f64
        } else {
            0.0
        }
    }
}
