//! Storage layer for zstack
//!
//! This crate implements the in-memory widget store with:
//! - ZIndex: BTreeMap-based ordering index (Z → id)
//! - StoreState: identity table + ordering index, mutated together
//! - OrderedStore: StoreState behind a parking_lot RwLock
//! - StoreWriter: held write guard for multi-step mutations
//! - StoreSnapshot: Z-ordered point-in-time copy
//!
//! # Concurrency
//!
//! Reads take the shared lock and may run in parallel. Every write takes the
//! exclusive lock, so the two indices are never observed out of step.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod index;
pub mod ordered;
pub mod snapshot;
pub mod state;

pub use index::ZIndex;
pub use ordered::{OrderedStore, StoreWriter};
pub use snapshot::StoreSnapshot;
pub use state::StoreState;
