//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing engine / audit trail
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (sessions-started counter, per-outcome attempt counter)
//!
//! Consumers:
//!     → log aggregation (stdout)
//!     → metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - The audit trail is the contract; metrics are cheap extras on top
//! - Metric updates are atomic increments, safe on the request path

pub mod logging;
pub mod metrics;
