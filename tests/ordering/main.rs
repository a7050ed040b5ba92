//! Ordering Integration Tests
//!
//! End-to-end behavior of the cascading Z order through the public crate:
//! concrete cascade scenarios, concurrent writers, the API facade and
//! randomized invariant checks.

#[path = "../common/mod.rs"]
mod common;

mod cascade_scenarios;
mod concurrency;
