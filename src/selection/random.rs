//! Uniform random selection strategy.

use rand::Rng;

use crate::quota::model::{Host, Region};
use crate::selection::SelectionStrategy;

/// Picks regions and hosts uniformly at random.
#[derive(Debug, Default)]
pub struct Random;

impl Random {
    pub fn new() -> Self {
        Self
    }
}

impl SelectionStrategy for Random {
    fn select_region(&self, regions: &[&Region]) -> usize {
        rand::thread_rng().gen_range(0..regions.len())
    }

    fn select_host(&self, hosts: &[Host]) -> usize {
        rand::thread_rng().gen_range(0..hosts.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quota::model::test_support::{host, region};

    #[test]
    fn test_selection_stays_in_range() {
        let strategy = Random::new();
        let regions = [
            region("a", vec![host("http://a:4444", "aaaa")]),
            region("b", vec![host("http://b:4444", "bbbb")]),
        ];
        let refs: Vec<&Region> = regions.iter().collect();
        for _ in 0..100 {
            assert!(strategy.select_region(&refs) < refs.len());
            assert!(strategy.select_host(&regions[0].hosts) < 1);
        }
    }
}
