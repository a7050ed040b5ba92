//! Core types and traits for zstack
//!
//! This crate defines the foundational types used throughout the system:
//! - WidgetId: Opaque widget identity
//! - Z: Ordering key
//! - Widget, WidgetDraft, WidgetPatch: Value records
//! - Error: Error type hierarchy
//! - Traits: ZOrdered / ZOrderedMut store abstraction

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod traits;
pub mod types;
pub mod widget;

pub use error::{Error, Result};
pub use traits::{ZOrdered, ZOrderedMut};
pub use types::{WidgetId, Z};
pub use widget::{Widget, WidgetDraft, WidgetPatch};
