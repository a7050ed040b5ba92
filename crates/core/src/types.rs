//! Identity and ordering key types
//!
//! This module defines the foundational types:
//! - WidgetId: Opaque, store-assigned widget identity
//! - Z: Signed ordering key establishing stacking order

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Ordering key for widgets
///
/// Unique among all stored widgets. Gaps are allowed; only relative order matters.
pub type Z = i64;

/// Unique identifier for a widget
///
/// A WidgetId is a wrapper around a UUID. It is assigned once when a widget
/// is created and never reassigned, including when a cascade moves the
/// widget to a different Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(Uuid);

impl WidgetId {
    /// Create a new random WidgetId using UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a WidgetId from a 128-bit value
    ///
    /// Used by sequential id generation, where the counter is the whole id.
    pub fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    /// Parse a WidgetId from a string representation
    ///
    /// Accepts standard UUID format (with or without hyphens).
    ///
    /// # Errors
    /// Returns None if the string is not a valid UUID.
    pub fn from_string(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl Default for WidgetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
