//! Per-request working copy of a version's topology.
//!
//! Tracks two sets through one request:
//! - `remaining`: regions that still have untried hosts
//! - `unexhausted`: regions not yet tried in the current round
//!
//! A failed host is removed from its region; an emptied region leaves
//! `remaining` for good. The tried region leaves `unexhausted` even when it
//! still has hosts, and once `unexhausted` drains while `remaining` is
//! non-empty it is refilled from `remaining`. That refill policy gives every
//! surviving region a turn each round instead of hammering one region while
//! others starve, and it bounds total attempts by the initial host count.

use crate::quota::model::{Host, Region, Version};
use crate::selection::SelectionStrategy;

/// Mutable region/host working set for a single request.
#[derive(Debug)]
pub struct WorkingSet {
    remaining: Vec<Region>,
    unexhausted: Vec<String>,
}

impl WorkingSet {
    /// Deep-copy the version's regions. Regions without hosts are dropped up
    /// front; they can never serve an attempt.
    pub fn new(version: &Version) -> Self {
        let remaining: Vec<Region> = version
            .regions
            .iter()
            .filter(|r| !r.hosts.is_empty())
            .cloned()
            .collect();
        let unexhausted = remaining.iter().map(|r| r.name.clone()).collect();
        Self {
            remaining,
            unexhausted,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Ask the strategy for a region from the current round, then a host
    /// within it. Returns the owning region's name alongside the host so the
    /// caller can exclude the pair on failure.
    pub fn select(&self, strategy: &dyn SelectionStrategy) -> Option<(String, Host)> {
        let candidates: Vec<&Region> = self
            .remaining
            .iter()
            .filter(|r| self.unexhausted.iter().any(|name| name == &r.name))
            .collect();
        if candidates.is_empty() {
            return None;
        }
        let region = candidates[strategy.select_region(&candidates)];
        let host = region.hosts[strategy.select_host(&region.hosts)].clone();
        Some((region.name.clone(), host))
    }

    /// Exclude a failed host, and its region once drained. The region is
    /// spent for this round either way; when the round has no regions left
    /// but some still hold hosts, a new round starts.
    pub fn exclude(&mut self, region_name: &str, route_id: &str) {
        if let Some(pos) = self.remaining.iter().position(|r| r.name == region_name) {
            self.remaining[pos].hosts.retain(|h| h.route_id != route_id);
            if self.remaining[pos].hosts.is_empty() {
                self.remaining.remove(pos);
            }
        }

        self.unexhausted.retain(|name| name != region_name);
        if self.unexhausted.is_empty() && !self.remaining.is_empty() {
            self.unexhausted = self.remaining.iter().map(|r| r.name.clone()).collect();
        }
    }
}
