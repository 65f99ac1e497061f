//! Pluggable region/host selection.
//!
//! # Design Decisions
//! - Strategies are pure pickers: given non-empty candidates, return the
//!   index of one of them; exclusion bookkeeping lives in the working set
//! - Strategies must never be called with empty input; the routing engine
//!   guarantees this
//! - Implementations are swappable without touching the routing engine

use std::fmt::Debug;
use std::sync::Arc;

use crate::config::schema::{SelectionConfig, StrategyKind};
use crate::quota::model::{Host, Region};

pub mod random;
pub mod round_robin;

pub use random::Random;
pub use round_robin::RoundRobin;

/// Picks one region, then one host, from the current candidates.
///
/// Callers guarantee the slices are non-empty; the returned index must be in
/// range.
pub trait SelectionStrategy: Send + Sync + Debug {
    fn select_region(&self, regions: &[&Region]) -> usize;
    fn select_host(&self, hosts: &[Host]) -> usize;
}

/// Build the configured strategy.
pub fn from_config(config: &SelectionConfig) -> Arc<dyn SelectionStrategy> {
    match config.strategy {
        StrategyKind::Random => Arc::new(Random::new()),
        StrategyKind::RoundRobin => Arc::new(RoundRobin::new()),
    }
}
