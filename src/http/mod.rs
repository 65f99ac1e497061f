//! HTTP subsystem: the inbound server and the outbound dispatcher.
//!
//! # Data Flow
//! ```text
//! POST /wd/hub/session
//!     → server.rs (parse body, extract caller identity, request id)
//!     → routing engine decides
//!         → dispatch.rs forwards to `host.route + original path`
//!           with bounded connect/response timeouts, following redirects
//!     → reply: 200 with rewritten session id, or 500 with the fixed
//!       error-code body
//! ```

pub mod dispatch;
pub mod server;

pub use dispatch::{BackendReply, DispatchError, Dispatcher, HttpDispatcher};
pub use server::HttpServer;
