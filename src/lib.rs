//! zstack - Widget store with unique, cascading Z ordering
//!
//! Every widget has a Z value no other widget shares. Placing a widget on an
//! occupied Z pushes the occupants up by one instead of failing.
//!
//! # Quick Start
//!
//! ```
//! use zstack::{WidgetApi, WidgetDraft};
//!
//! let api = WidgetApi::in_memory();
//! let a = api.create(WidgetDraft::at(10, 10, 1)).unwrap();
//! let b = api.create(WidgetDraft::at(10, 10, 2)).unwrap();
//!
//! // Z = 1 is taken: a and b move up
//! let c = api.create(WidgetDraft::at(10, 10, 1)).unwrap();
//! let zs: Vec<_> = api.list().iter().map(|w| (w.id, w.z)).collect();
//! assert_eq!(zs, vec![(c.id, 1), (a.id, 2), (b.id, 3)]);
//! ```
//!
//! # Architecture
//!
//! - [`WidgetApi`]: validation and fetch-or-NotFound over the engine
//! - [`OrderingService`]: the only writer of Z values
//! - [`OrderedStore`]: identity and ordering indices behind one lock

pub use zstack_api::WidgetApi;
pub use zstack_core::{Error, Result, Widget, WidgetDraft, WidgetId, WidgetPatch, ZOrdered, Z};
pub use zstack_engine::{
    EngineConfig, IdStrategy, MetricsSnapshot, OrderingService, SequentialIds, ShiftPolicy,
    CONFIG_FILE_NAME,
};
pub use zstack_storage::{OrderedStore, StoreSnapshot};
