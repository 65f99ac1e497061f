//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, route-id invariants)
//!     → RouterConfig (validated, immutable)
//!     → quota snapshot built and shared via ArcSwap
//!
//! On reload:
//!     watcher.rs detects change
//!     → loader.rs loads & validates new config
//!     → atomic swap of the quota snapshot
//!     → requests started after the swap see the new topology;
//!       in-flight requests keep their already-copied working sets
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a full reload
//! - All top-level blocks have defaults so a minimal file works
//! - Validation separates syntactic (serde) from semantic checks
//! - Listener/timeout changes need a restart; only the topology hot-swaps

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::{
    BrowserConfig, HostConfig, ListenerConfig, ObservabilityConfig, RegionConfig, RouterConfig,
    SelectionConfig, StrategyKind, TimeoutConfig, UserConfig, VersionConfig,
};
