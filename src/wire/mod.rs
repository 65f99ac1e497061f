//! Wire message codec.
//!
//! # Data Flow
//! ```text
//! Inbound body (JSON)
//!     → message.rs (parse, read desiredCapabilities)
//!     → routing engine stamps the resolved version
//!     → same message forwarded to the chosen backend
//!     → backend reply parsed, session id rewritten
//!     → serialized back to the client
//! ```
//!
//! # Design Decisions
//! - Messages keep every field they arrived with; only the fields this proxy
//!   cares about (capabilities, session id, error message) get typed access
//! - One fixed numeric error code on the wire for all routing-layer failures
//! - Capability attributes are opaque; `describe()` is for logs only

pub mod message;

pub use message::{Capabilities, SessionMessage, WIRE_ERROR_CODE};
