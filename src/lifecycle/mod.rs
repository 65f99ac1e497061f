//! Lifecycle management.
//!
//! # Design Decisions
//! - Ordered startup: config first, then engine, then the listener
//! - Shutdown is a broadcast; every long-running task subscribes

pub mod shutdown;

pub use shutdown::Shutdown;
