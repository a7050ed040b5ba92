//! Widget value types
//!
//! - Widget: The stored record (identity, size, Z)
//! - WidgetDraft: Candidate for creation, Z optional
//! - WidgetPatch: Partial update merged onto a stored widget
//!
//! All three are plain values. A `Widget` obtained from the store is a copy;
//! changing it has no effect until it is written back through an update.

use crate::error::{Error, Result};
use crate::types::{WidgetId, Z};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A rectangular widget with a unique ordering key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Widget {
    /// Store-assigned identity, stable for the widget's lifetime
    pub id: WidgetId,
    /// Width, always positive
    pub width: u32,
    /// Height, always positive
    pub height: u32,
    /// Ordering key, unique among stored widgets
    pub z: Z,
}

impl Widget {
    /// Create a widget value
    pub fn new(id: WidgetId, width: u32, height: u32, z: Z) -> Self {
        Self {
            id,
            width,
            height,
            z,
        }
    }

    /// Copy of this widget moved to another Z
    #[inline]
    pub fn with_z(self, z: Z) -> Self {
        Self { z, ..self }
    }

    /// Copy of this widget with another size
    #[inline]
    pub fn with_size(self, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..self
        }
    }

    /// Check the size constraints
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if width or height is zero.
    pub fn validate(&self) -> Result<()> {
        validate_size(self.width, self.height)
    }
}

impl fmt::Display for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Widget({} {}x{} z={})",
            self.id, self.width, self.height, self.z
        )
    }
}

fn validate_size(width: u32, height: u32) -> Result<()> {
    if width == 0 {
        return Err(Error::invalid_input("width must be positive"));
    }
    if height == 0 {
        return Err(Error::invalid_input("height must be positive"));
    }
    Ok(())
}

/// Candidate widget for creation
///
/// Carries no id: ids are always assigned at creation. A missing `z` asks
/// for placement above every existing widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WidgetDraft {
    /// Requested width
    pub width: u32,
    /// Requested height
    pub height: u32,
    /// Requested Z, or None for auto-assignment
    #[serde(default)]
    pub z: Option<Z>,
}

impl WidgetDraft {
    /// Draft without a Z (placed on top)
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            z: None,
        }
    }

    /// Draft at an explicit Z
    pub fn at(width: u32, height: u32, z: Z) -> Self {
        Self {
            width,
            height,
            z: Some(z),
        }
    }

    /// Check the size constraints
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if width or height is zero.
    pub fn validate(&self) -> Result<()> {
        validate_size(self.width, self.height)
    }

    /// Materialize the draft with an id and a resolved Z
    pub fn into_widget(self, id: WidgetId, z: Z) -> Widget {
        Widget::new(id, self.width, self.height, z)
    }
}

/// Partial update for an existing widget
///
/// Absent fields keep the stored value. The id is not patchable; a JSON
/// document naming `id` (or any other unknown field) is rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WidgetPatch {
    /// New width
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// New height
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// New Z
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<Z>,
}

impl WidgetPatch {
    /// Parse a patch from a JSON object
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for malformed JSON, wrong field types, or unknown fields.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// True if the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.height.is_none() && self.z.is_none()
    }

    /// Merge onto a copy of `widget`
    pub fn apply_to(&self, widget: &Widget) -> Widget {
        Widget {
            id: widget.id,
            width: self.width.unwrap_or(widget.width),
            height: self.height.unwrap_or(widget.height),
            z: self.z.unwrap_or(widget.z),
        }
    }
}
