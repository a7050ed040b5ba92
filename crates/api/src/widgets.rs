//! Widget API implementation
//!
//! `WidgetApi` wraps `OrderingService` with the request-level rules:
//! - fetch-or-NotFound before any read-then-write
//! - width and height must be positive
//! - the id is store-assigned and never changes
//!
//! ## Desugaring
//!
//! | Call | Service call |
//! |------|--------------|
//! | `create(draft)` | `validate` then `create(draft)` |
//! | `replace(id, draft)` | `modify(id, draft with the stored id)` |
//! | `patch(id, patch)` | `modify(id, patch merged onto the stored widget)` |
//! | `delete(id)` | `delete(id)` |
//!
//! Replace and patch read and write under one write section, so the merge
//! always starts from the record being replaced.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;
use zstack_core::{Result, Widget, WidgetDraft, WidgetId, WidgetPatch};
use zstack_engine::{EngineConfig, OrderingService};
use zstack_storage::OrderedStore;

// =============================================================================
// WidgetApi
// =============================================================================

/// Widget API over a shared ordering service
///
/// Cloning is cheap and every clone drives the same store.
#[derive(Debug, Clone)]
pub struct WidgetApi {
    service: Arc<OrderingService>,
}

impl WidgetApi {
    /// Wrap an existing service
    pub fn new(service: Arc<OrderingService>) -> Self {
        WidgetApi { service }
    }

    /// Fresh empty store with default settings
    pub fn in_memory() -> Self {
        Self::new(Arc::new(OrderingService::new(Arc::new(OrderedStore::new()))))
    }

    /// Fresh empty store configured from `config`
    ///
    /// # Errors
    ///
    /// Returns `Config` for unknown policy or id strategy names.
    pub fn with_config(config: &EngineConfig) -> Result<Self> {
        let service = OrderingService::with_config(Arc::new(OrderedStore::new()), config)?;
        Ok(Self::new(Arc::new(service)))
    }

    /// Fresh empty store configured from a `zstack.toml` file
    ///
    /// Writes the default config first if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the default file cannot be written, `Config` if the
    /// file cannot be read or holds invalid values.
    pub fn from_config_file(path: &Path) -> Result<Self> {
        EngineConfig::write_default_if_missing(path)?;
        let config = EngineConfig::from_file(path)?;
        Self::with_config(&config)
    }

    /// The underlying service
    pub fn service(&self) -> &OrderingService {
        &self.service
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Widget by id, if stored
    pub fn find(&self, id: &WidgetId) -> Option<Widget> {
        self.service.find(id)
    }

    /// Widget by id
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no widget has this id.
    pub fn get(&self, id: &WidgetId) -> Result<Widget> {
        self.service.get(id)
    }

    /// Every widget, ascending by Z
    pub fn list(&self) -> Vec<Widget> {
        self.service.list()
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Create a widget
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a zero width or height, `ZOverflow` if the
    /// placement does not fit in the Z domain.
    pub fn create(&self, draft: WidgetDraft) -> Result<Widget> {
        draft.validate()?;
        let widget = self.service.create(draft)?;
        debug!(target: "zstack::api", id = %widget.id, z = widget.z, "created");
        Ok(widget)
    }

    /// Replace a widget's size and Z
    ///
    /// A draft without Z keeps the widget's current Z.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a zero width or height, `NotFound` if the
    /// id is not stored, `ZOverflow` if the move does not fit.
    pub fn replace(&self, id: &WidgetId, draft: WidgetDraft) -> Result<Widget> {
        draft.validate()?;
        let widget = self.service.modify(id, |current| {
            Ok(draft.into_widget(current.id, draft.z.unwrap_or(current.z)))
        })?;
        debug!(target: "zstack::api", id = %widget.id, z = widget.z, "replaced");
        Ok(widget)
    }

    /// Merge a partial update onto a widget
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is not stored, `InvalidInput` if the
    /// merged widget has a zero width or height, `ZOverflow` if the move does
    /// not fit.
    pub fn patch(&self, id: &WidgetId, patch: WidgetPatch) -> Result<Widget> {
        let widget = self.service.modify(id, |current| {
            let desired = patch.apply_to(current);
            desired.validate()?;
            Ok(desired)
        })?;
        debug!(target: "zstack::api", id = %widget.id, z = widget.z, "patched");
        Ok(widget)
    }

    /// Merge a JSON partial update onto a widget
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for malformed JSON or unknown fields (including
    /// `id`), then the errors of [`patch`](Self::patch).
    pub fn patch_json(&self, id: &WidgetId, json: &str) -> Result<Widget> {
        let patch = WidgetPatch::from_json(json)?;
        self.patch(id, patch)
    }

    /// Delete a widget; deleting an absent id succeeds
    pub fn delete(&self, id: &WidgetId) {
        if self.service.delete(id).is_some() {
            debug!(target: "zstack::api", id = %id, "deleted");
        }
    }
}
