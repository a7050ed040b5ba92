//! StoreState: the identity table and the ordering index as one unit
//!
//! The identity table owns the canonical `Widget` records. The ordering
//! index stores only ids, never a second copy of a widget, so the two can
//! disagree only through a bug in this module. Every mutation below
//! updates both structures before returning.
//!
//! This type has no locking of its own. `OrderedStore` wraps it in a
//! `RwLock`; tests and the cascade can also drive it directly.

use rustc_hash::FxHashMap;
use tracing::trace;
use zstack_core::{Error, Result, Widget, WidgetId, ZOrdered, ZOrderedMut, Z};

use crate::index::ZIndex;

/// Both indices over the stored widgets
#[derive(Debug, Default, Clone)]
pub struct StoreState {
    /// Identity table: owns the records
    widgets: FxHashMap<WidgetId, Widget>,
    /// Ordering index: Z → id
    z_index: ZIndex,
}

impl StoreState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with pre-allocated identity table capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            widgets: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            z_index: ZIndex::new(),
        }
    }

    /// Verify uniqueness and index consistency
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` describing the first inconsistency found.
    pub fn check_invariants(&self) -> Result<()> {
        if self.widgets.len() != self.z_index.len() {
            return Err(Error::InvariantViolation(format!(
                "identity table has {} widgets, ordering index has {} entries",
                self.widgets.len(),
                self.z_index.len()
            )));
        }
        for (z, id) in self.z_index.iter() {
            match self.widgets.get(&id) {
                None => {
                    return Err(Error::InvariantViolation(format!(
                        "z={} points to missing widget {}",
                        z, id
                    )))
                }
                Some(w) if w.z != z => {
                    return Err(Error::InvariantViolation(format!(
                        "z={} points to widget {} which has z={}",
                        z, id, w.z
                    )))
                }
                Some(_) => {}
            }
        }
        for (id, w) in &self.widgets {
            if w.id != *id {
                return Err(Error::InvariantViolation(format!(
                    "widget {} stored under id {}",
                    w.id, id
                )));
            }
            if self.z_index.get(w.z) != Some(*id) {
                return Err(Error::InvariantViolation(format!(
                    "widget {} at z={} is not indexed there",
                    id, w.z
                )));
            }
        }
        Ok(())
    }

    /// Panic if the indices disagree
    pub fn assert_consistent(&self) {
        if let Err(e) = self.check_invariants() {
            panic!("{}", e);
        }
    }

    fn unindex(&mut self, widget: &Widget) {
        // Only drop the Z entry if it still belongs to this widget
        if self.z_index.get(widget.z) == Some(widget.id) {
            self.z_index.remove(widget.z);
        }
    }
}

impl ZOrdered for StoreState {
    fn get_by_id(&self, id: &WidgetId) -> Option<Widget> {
        self.widgets.get(id).copied()
    }

    fn get_by_z(&self, z: Z) -> Option<Widget> {
        self.z_index
            .get(z)
            .and_then(|id| self.widgets.get(&id))
            .copied()
    }

    fn ceiling_by_z(&self, z: Z) -> Option<Widget> {
        self.z_index
            .ceiling(z)
            .and_then(|(_, id)| self.widgets.get(&id))
            .copied()
    }

    fn zs_greater_or_equal_desc(&self, z: Z) -> Vec<Z> {
        self.z_index.greater_or_equal_desc(z)
    }

    fn all_ordered_by_z(&self) -> Vec<Widget> {
        self.z_index
            .iter()
            .filter_map(|(_, id)| self.widgets.get(&id).copied())
            .collect()
    }

    fn max_z(&self) -> Option<Z> {
        self.z_index.max()
    }

    fn len(&self) -> usize {
        self.widgets.len()
    }
}

impl ZOrderedMut for StoreState {
    fn put(&mut self, widget: Widget) -> Widget {
        if let Some(holder) = self.z_index.get(widget.z) {
            assert!(
                holder == widget.id,
                "put of widget {} at z={} would displace widget {}",
                widget.id,
                widget.z,
                holder
            );
        }
        if let Some(previous) = self.widgets.insert(widget.id, widget) {
            if previous.z != widget.z {
                self.unindex(&previous);
            }
        }
        self.z_index.insert(widget.z, widget.id);
        trace!(target: "zstack::store", id = %widget.id, z = widget.z, "put");
        widget
    }

    fn remove_by_id(&mut self, id: &WidgetId) -> Option<Widget> {
        let removed = self.widgets.remove(id)?;
        self.unindex(&removed);
        trace!(target: "zstack::store", id = %removed.id, z = removed.z, "removed by id");
        Some(removed)
    }

    fn remove_by_z(&mut self, z: Z) -> Option<Widget> {
        let id = self.z_index.remove(z)?;
        let removed = self.widgets.remove(&id);
        assert!(
            removed.is_some(),
            "z={} pointed to widget {} missing from identity table",
            z,
            id
        );
        trace!(target: "zstack::store", id = %id, z, "removed by z");
        removed
    }
}
