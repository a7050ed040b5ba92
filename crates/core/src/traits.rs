//! Core traits for the dual-indexed widget store
//!
//! The ordering engine is written against these traits rather than a concrete
//! store, so the cascade can run on a held write guard, on a bare in-memory
//! state in tests, or on any other implementation that keeps both indices.

use crate::types::{WidgetId, Z};
use crate::widget::Widget;

/// Read access to widgets by identity and by Z
///
/// Every method returns copies. Sequences are finite snapshots: mutations
/// after the call do not change an already returned `Vec`.
pub trait ZOrdered {
    /// Point lookup by identity
    fn get_by_id(&self, id: &WidgetId) -> Option<Widget>;

    /// Point lookup by Z
    fn get_by_z(&self, z: Z) -> Option<Widget>;

    /// Widget with the smallest Z that is >= `z`
    fn ceiling_by_z(&self, z: Z) -> Option<Widget>;

    /// All occupied Z values >= `z`, highest first
    fn zs_greater_or_equal_desc(&self, z: Z) -> Vec<Z>;

    /// All widgets, ascending by Z
    fn all_ordered_by_z(&self) -> Vec<Widget>;

    /// Largest occupied Z, None when empty
    fn max_z(&self) -> Option<Z>;

    /// Number of stored widgets
    fn len(&self) -> usize;

    /// True if no widget is stored
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if some widget occupies `z`
    fn is_z_occupied(&self, z: Z) -> bool {
        self.get_by_z(z).is_some()
    }
}

/// Write access, updating both indices together
///
/// Callers own the Z-uniqueness precondition for `put`: no *other* widget
/// may currently hold the target Z.
pub trait ZOrderedMut: ZOrdered {
    /// Insert or replace a widget under its id, indexing it under its Z
    fn put(&mut self, widget: Widget) -> Widget;

    /// Remove by identity from both indices
    fn remove_by_id(&mut self, id: &WidgetId) -> Option<Widget>;

    /// Remove by Z from both indices
    fn remove_by_z(&mut self, z: Z) -> Option<Widget>;
}
