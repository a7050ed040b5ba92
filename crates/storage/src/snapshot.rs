//! StoreSnapshot: an immutable, Z-ordered copy of the store
//!
//! Captured under the read lock, so it never reflects half of a write
//! critical section. Writes after capture do not affect it.

use zstack_core::{Widget, WidgetId, Z};

/// Point-in-time copy of every stored widget, ascending by Z
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSnapshot {
    version: u64,
    widgets: Vec<Widget>,
}

impl StoreSnapshot {
    /// Create a snapshot from widgets already sorted ascending by Z
    pub fn new(version: u64, widgets: Vec<Widget>) -> Self {
        debug_assert!(
            widgets.windows(2).all(|pair| pair[0].z < pair[1].z),
            "snapshot widgets must be strictly ascending by z"
        );
        Self { version, widgets }
    }

    /// Store write version at capture time
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of widgets captured
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// True if the store was empty
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Widgets ascending by Z
    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    /// Iterate ascending by Z
    pub fn iter(&self) -> std::slice::Iter<'_, Widget> {
        self.widgets.iter()
    }

    /// Lookup by Z (binary search)
    pub fn get_by_z(&self, z: Z) -> Option<&Widget> {
        self.widgets
            .binary_search_by_key(&z, |w| w.z)
            .ok()
            .map(|i| &self.widgets[i])
    }

    /// Lookup by id (linear scan)
    pub fn get_by_id(&self, id: &WidgetId) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == *id)
    }

    /// Occupied Z values, ascending
    pub fn zs(&self) -> Vec<Z> {
        self.widgets.iter().map(|w| w.z).collect()
    }

    /// Consume into the widget list
    pub fn into_vec(self) -> Vec<Widget> {
        self.widgets
    }
}

impl IntoIterator for StoreSnapshot {
    type Item = Widget;
    type IntoIter = std::vec::IntoIter<Widget>;

    fn into_iter(self) -> Self::IntoIter {
        self.widgets.into_iter()
    }
}

impl<'a> IntoIterator for &'a StoreSnapshot {
    type Item = &'a Widget;
    type IntoIter = std::slice::Iter<'a, Widget>;

    fn into_iter(self) -> Self::IntoIter {
        self.widgets.iter()
    }
}
