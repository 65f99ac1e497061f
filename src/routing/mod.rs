//! Routing subsystem: the failover decision engine.
//!
//! # Data Flow
//! ```text
//! RouteRequest (user, remote host, path, message)
//!     → engine.rs: resolve version, stamp it onto the capabilities
//!     → loop: select region+host → dispatch → on failure exclude & retry
//!     → on success: session_id.rs rewrites the returned session id
//!     → audit.rs records every attempt and the terminal outcome
//! ```
//!
//! # Design Decisions
//! - Attempts are strictly sequential; no speculative parallel dispatch,
//!   which would risk duplicate sessions on multiple backends
//! - Per-attempt failures never cross the boundary; only the two terminal
//!   errors below do, and both map to the same wire shape
//! - All per-request state is private working copies; no locks anywhere

use thiserror::Error;

pub mod audit;
pub mod engine;
pub mod session_id;

pub use audit::{Attempt, AttemptAudit, Outcome, TracingAudit};
pub use engine::{RouteRequest, RoutingEngine};

/// Terminal routing failures. Everything else is absorbed by the retry loop.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoutingError {
    /// No configured version satisfies the request. No attempts were made.
    #[error("Cannot find {0} capabilities on any available node")]
    CapabilityMismatch(String),

    /// Every host in every region was tried and failed.
    #[error("Cannot create session on any available node")]
    Exhausted,
}
