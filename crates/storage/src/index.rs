//! Ordering index: Z → WidgetId
//!
//! The identity table owns the widget records; this index only maps each
//! occupied Z to the id holding it. Backed by a BTreeMap so ceiling lookups,
//! descending range scans and max queries are O(log n).

use std::collections::BTreeMap;
use zstack_core::{WidgetId, Z};

/// Secondary index: Z → WidgetId
#[derive(Debug, Default, Clone)]
pub struct ZIndex {
    index: BTreeMap<Z, WidgetId>,
}

impl ZIndex {
    /// Create a new empty ZIndex
    pub fn new() -> Self {
        Self {
            index: BTreeMap::new(),
        }
    }

    /// Map `z` to `id`, returning the id previously at `z`
    pub fn insert(&mut self, z: Z, id: WidgetId) -> Option<WidgetId> {
        self.index.insert(z, id)
    }

    /// Unmap `z`, returning the id that held it
    pub fn remove(&mut self, z: Z) -> Option<WidgetId> {
        self.index.remove(&z)
    }

    /// Id holding `z`
    pub fn get(&self, z: Z) -> Option<WidgetId> {
        self.index.get(&z).copied()
    }

    /// Smallest occupied Z >= `z`, with its id
    pub fn ceiling(&self, z: Z) -> Option<(Z, WidgetId)> {
        self.index.range(z..).next().map(|(z, id)| (*z, *id))
    }

    /// Occupied Z values >= `z`, descending
    pub fn greater_or_equal_desc(&self, z: Z) -> Vec<Z> {
        self.index.range(z..).rev().map(|(z, _)| *z).collect()
    }

    /// Largest occupied Z
    pub fn max(&self) -> Option<Z> {
        self.index.keys().next_back().copied()
    }

    /// Entries ascending by Z
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Z, WidgetId)> + '_ {
        self.index.iter().map(|(z, id)| (*z, *id))
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Get the number of occupied Z values
    pub fn len(&self) -> usize {
        self.index.len()
    }
}
