//! Stateless session-routing proxy.
//!
//! Routes "create session" requests to a pool of backend nodes grouped into
//! regions. The proxy resolves the requested capabilities against the caller's
//! configured quota, picks a region and a host through a pluggable selection
//! strategy, dispatches downstream, and on failure retries against a
//! different host with failed candidates excluded, until success or the
//! topology is exhausted.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client POST /wd/hub/session
//!       │
//!       ▼
//!   ┌─────────┐    ┌──────────────┐    ┌─────────────┐
//!   │  http   │───▶│    quota     │───▶│  selection  │
//!   │ server  │    │ match+working│    │  strategy   │
//!   └─────────┘    └──────────────┘    └──────┬──────┘
//!       ▲                                     │
//!       │          ┌──────────────┐           ▼
//!       └──────────│   routing    │◀── region + host
//!                  │   engine     │
//!                  └──────┬───────┘
//!                         │ dispatch (bounded timeouts)
//!                         ▼
//!                    backend node ──▶ session id, rewritten with route id
//! ```
//!
//! On success the returned session id is prefixed with the chosen host's
//! stable route id, so later requests for the same logical session can be
//! demultiplexed back to the same host without per-session state kept here.

// Core subsystems
pub mod config;
pub mod http;
pub mod quota;
pub mod routing;
pub mod wire;

// Pluggable selection
pub mod selection;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::RouterConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
