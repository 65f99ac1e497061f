//! Quota and topology subsystem.
//!
//! # Data Flow
//! ```text
//! Validated RouterConfig
//!     → model.rs (immutable Quotas snapshot, shared via ArcSwap)
//!
//! Per request:
//!     matcher.rs (user + capabilities → Version, pure lookup)
//!     → working.rs (deep copy of the version's regions/hosts)
//!     → routing engine mutates only the working copy
//! ```
//!
//! # Design Decisions
//! - The canonical snapshot is never mutated; reloads swap it wholesale
//! - Working copies are built once per request, so concurrent requests never
//!   observe each other's exclusions and no locks are needed
//! - Hosts are identified by route id for exclusion (unique by validation)

pub mod matcher;
pub mod model;
pub mod working;

pub use matcher::resolve_version;
pub use model::{Host, Quotas, Region, UserQuota, Version};
pub use working::WorkingSet;
