//! Round-robin selection strategy.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::quota::model::{Host, Region};
use crate::selection::SelectionStrategy;

/// Rotates through candidates with independent counters for regions and
/// hosts.
///
/// Rotation is over whatever candidate set the engine passes in, which
/// shrinks as hosts are excluded; the counters only guarantee that
/// consecutive picks spread across the candidates.
#[derive(Debug, Default)]
pub struct RoundRobin {
    region_counter: AtomicUsize,
    host_counter: AtomicUsize,
}

impl RoundRobin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SelectionStrategy for RoundRobin {
    fn select_region(&self, regions: &[&Region]) -> usize {
        self.region_counter.fetch_add(1, Ordering::Relaxed) % regions.len()
    }

    fn select_host(&self, hosts: &[Host]) -> usize {
        self.host_counter.fetch_add(1, Ordering::Relaxed) % hosts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quota::model::test_support::{host, region};

    #[test]
    fn test_rotation() {
        let strategy = RoundRobin::new();
        let regions = [
            region("a", vec![host("http://a:4444", "aaaa")]),
            region("b", vec![host("http://b:4444", "bbbb")]),
        ];
        let refs: Vec<&Region> = regions.iter().collect();

        let first = strategy.select_region(&refs);
        let second = strategy.select_region(&refs);
        assert_ne!(first, second);
        assert_eq!(first, strategy.select_region(&refs));
    }
}
