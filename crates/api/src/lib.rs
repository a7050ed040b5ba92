//! Public API layer for zstack
//!
//! `WidgetApi` is the request-facing surface over the ordering engine. It
//! owns the checks a request handler would otherwise repeat:
//! - size validation on every create, replace and patch
//! - fetch-or-NotFound for read-then-write flows
//! - ids are store-assigned and immutable
//!
//! ## Quick Start
//!
//! ```
//! use zstack_api::WidgetApi;
//! use zstack_core::WidgetDraft;
//!
//! let api = WidgetApi::in_memory();
//! let back = api.create(WidgetDraft::at(100, 50, 1)).unwrap();
//! let front = api.create(WidgetDraft::new(20, 20)).unwrap();
//! assert_eq!(front.z, 2);
//!
//! api.patch_json(&front.id, r#"{"z": 1}"#).unwrap();
//! assert_eq!(api.get(&back.id).unwrap().z, 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod widgets;

pub use widgets::WidgetApi;
