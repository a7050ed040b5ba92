//! OrderedStore: concurrent dual-index widget store
//!
//! This module wraps `StoreState` with:
//! - `parking_lot::RwLock` so reads run concurrently and writes are serialized
//! - `AtomicU64` write version, bumped once per committed write section
//! - `StoreWriter`, a held write guard for multi-step mutations
//!
//! # Atomicity
//!
//! Single-call writes (`put`, `remove_by_id`, `remove_by_z`) take the write
//! lock for the duration of the call. Compound changes such as a cascade
//! must instead go through [`OrderedStore::write`]: the guard is held until
//! it is dropped, so no reader and no other writer observes the store
//! between the steps. The lock is released on every exit path, including
//! early returns and panics.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{RwLock, RwLockWriteGuard};
use tracing::debug;
use zstack_core::{Result, Widget, WidgetId, ZOrdered, ZOrderedMut, Z};

use crate::snapshot::StoreSnapshot;
use crate::state::StoreState;

/// Thread-safe widget store indexed by identity and by Z
///
/// # Example
///
/// ```
/// use zstack_core::{Widget, WidgetId, ZOrdered};
/// use zstack_storage::OrderedStore;
///
/// let store = OrderedStore::new();
/// let w = Widget::new(WidgetId::new(), 10, 20, 1);
/// store.put(w);
/// assert_eq!(store.get_by_z(1), Some(w));
/// assert_eq!(store.max_z(), Some(1));
/// ```
#[derive(Debug, Default)]
pub struct OrderedStore {
    state: RwLock<StoreState>,
    version: AtomicU64,
}

impl OrderedStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::new()),
            version: AtomicU64::new(0),
        }
    }

    /// Create with an expected number of widgets
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            state: RwLock::new(StoreState::with_capacity(capacity)),
            version: AtomicU64::new(0),
        }
    }

    /// Number of committed write sections so far
    #[inline]
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Acquire the single-writer guard
    ///
    /// Blocks until all readers and the current writer (if any) are done.
    pub fn write(&self) -> StoreWriter<'_> {
        StoreWriter {
            guard: self.state.write(),
            version: &self.version,
            dirty: false,
        }
    }

    /// Insert or replace a widget
    ///
    /// The caller guarantees no other widget currently holds `widget.z`.
    pub fn put(&self, widget: Widget) -> Widget {
        let mut writer = self.write();
        writer.put(widget)
    }

    /// Remove by identity, atomically from both indices
    pub fn remove_by_id(&self, id: &WidgetId) -> Option<Widget> {
        let mut writer = self.write();
        writer.remove_by_id(id)
    }

    /// Remove by Z, atomically from both indices
    pub fn remove_by_z(&self, z: Z) -> Option<Widget> {
        let mut writer = self.write();
        writer.remove_by_z(z)
    }

    /// Consistent copy of every widget, ascending by Z
    pub fn snapshot(&self) -> StoreSnapshot {
        // Read version under the lock so it matches the captured contents
        let state = self.state.read();
        StoreSnapshot::new(self.version(), state.all_ordered_by_z())
    }

    /// Verify uniqueness and index consistency
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` on the first inconsistency found.
    pub fn check_invariants(&self) -> Result<()> {
        self.state.read().check_invariants()
    }

    /// Panic if the indices disagree
    pub fn assert_consistent(&self) {
        self.state.read().assert_consistent()
    }
}

impl ZOrdered for OrderedStore {
    fn get_by_id(&self, id: &WidgetId) -> Option<Widget> {
        self.state.read().get_by_id(id)
    }

    fn get_by_z(&self, z: Z) -> Option<Widget> {
        self.state.read().get_by_z(z)
    }

    fn ceiling_by_z(&self, z: Z) -> Option<Widget> {
        self.state.read().ceiling_by_z(z)
    }

    fn zs_greater_or_equal_desc(&self, z: Z) -> Vec<Z> {
        self.state.read().zs_greater_or_equal_desc(z)
    }

    fn all_ordered_by_z(&self) -> Vec<Widget> {
        self.state.read().all_ordered_by_z()
    }

    fn max_z(&self) -> Option<Z> {
        self.state.read().max_z()
    }

    fn len(&self) -> usize {
        self.state.read().len()
    }
}

/// Exclusive write access to an `OrderedStore`
///
/// Exposes the full read and write surface on the locked state. Dropping
/// the writer releases the lock; if anything was written, the store
/// version is bumped once before release.
pub struct StoreWriter<'a> {
    guard: RwLockWriteGuard<'a, StoreState>,
    version: &'a AtomicU64,
    dirty: bool,
}

impl StoreWriter<'_> {
    /// Verify uniqueness and index consistency on the locked state
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` on the first inconsistency found.
    pub fn check_invariants(&self) -> Result<()> {
        self.guard.check_invariants()
    }

    /// True if this writer has modified the store
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl ZOrdered for StoreWriter<'_> {
    fn get_by_id(&self, id: &WidgetId) -> Option<Widget> {
        self.guard.get_by_id(id)
    }

    fn get_by_z(&self, z: Z) -> Option<Widget> {
        self.guard.get_by_z(z)
    }

    fn ceiling_by_z(&self, z: Z) -> Option<Widget> {
        self.guard.ceiling_by_z(z)
    }

    fn zs_greater_or_equal_desc(&self, z: Z) -> Vec<Z> {
        self.guard.zs_greater_or_equal_desc(z)
    }

    fn all_ordered_by_z(&self) -> Vec<Widget> {
        self.guard.all_ordered_by_z()
    }

    fn max_z(&self) -> Option<Z> {
        self.guard.max_z()
    }

    fn len(&self) -> usize {
        self.guard.len()
    }
}

impl ZOrderedMut for StoreWriter<'_> {
    fn put(&mut self, widget: Widget) -> Widget {
        self.dirty = true;
        self.guard.put(widget)
    }

    fn remove_by_id(&mut self, id: &WidgetId) -> Option<Widget> {
        let removed = self.guard.remove_by_id(id);
        self.dirty |= removed.is_some();
        removed
    }

    fn remove_by_z(&mut self, z: Z) -> Option<Widget> {
        let removed = self.guard.remove_by_z(z);
        self.dirty |= removed.is_some();
        removed
    }
}

impl Drop for StoreWriter<'_> {
    fn drop(&mut self) {
        if self.dirty {
            // Still holding the lock: readers see the new version only with the new state
            let version = self.version.fetch_add(1, Ordering::AcqRel) + 1;
            debug!(target: "zstack::store", version, widgets = self.guard.len(), "write committed");
        }
    }
}
