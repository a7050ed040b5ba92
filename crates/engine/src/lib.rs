//! Ordering engine for zstack
//!
//! This crate decides every widget's Z:
//! - OrderingService: create / update / modify / delete over a shared store
//! - Cascade: freeing a Z by shifting occupants up by one (`ShiftPolicy`)
//! - Id generation (random or sequential)
//! - Service metrics
//! - `zstack.toml` configuration
//!
//! The engine is the only component that writes Z values. Callers above it
//! (the API facade) validate input and never touch the store directly.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cascade;
pub mod config;
pub mod ids;
pub mod metrics;
pub mod service;

pub use cascade::{make_space_for_z, ShiftPolicy};
pub use config::{EngineConfig, CONFIG_FILE_NAME};
pub use ids::{IdGenerator, IdStrategy, RandomIds, SequentialIds};
pub use metrics::{MetricsSnapshot, ServiceMetrics};
pub use service::OrderingService;
