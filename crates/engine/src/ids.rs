//! Widget id generation
//!
//! The only hard requirement is uniqueness within one store. `RandomIds`
//! relies on UUID v4; `SequentialIds` uses a monotonic counter and yields
//! reproducible ids, which tests and benchmarks rely on.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use zstack_core::{Error, Result, WidgetId};

/// Source of fresh widget ids
pub trait IdGenerator: Send + Sync + fmt::Debug {
    /// Produce an id never returned before by this generator
    fn next_id(&self) -> WidgetId;
}

/// Random UUID v4 ids
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&self) -> WidgetId {
        WidgetId::new()
    }
}

/// Counter-based ids: 1, 2, 3, ... encoded as UUIDs
#[derive(Debug, Default)]
pub struct SequentialIds {
    last: AtomicU64,
}

impl SequentialIds {
    /// Start counting from 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume after `last` (the next id is `last + 1`)
    pub fn starting_after(last: u64) -> Self {
        Self {
            last: AtomicU64::new(last),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> WidgetId {
        let n = self.last.fetch_add(1, Ordering::Relaxed) + 1;
        WidgetId::from_u128(n as u128)
    }
}

/// Configured id generation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdStrategy {
    /// UUID v4
    #[default]
    Random,
    /// Monotonic counter
    Sequential,
}

impl IdStrategy {
    /// Config spelling of this strategy
    pub fn as_str(&self) -> &'static str {
        match self {
            IdStrategy::Random => "random",
            IdStrategy::Sequential => "sequential",
        }
    }

    /// Build a fresh generator for this strategy
    pub fn generator(&self) -> Box<dyn IdGenerator> {
        match self {
            IdStrategy::Random => Box::new(RandomIds),
            IdStrategy::Sequential => Box::new(SequentialIds::new()),
        }
    }
}

impl FromStr for IdStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "random" => Ok(IdStrategy::Random),
            "sequential" => Ok(IdStrategy::Sequential),
            other => Err(Error::config(format!(
                "Invalid id strategy '{}'. Expected \"random\" or \"sequential\".",
                other
            ))),
        }
    }
}
