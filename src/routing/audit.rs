//! Per-attempt audit trail.
//!
//! # Responsibilities
//! - Record every dispatch attempt before it happens and its outcome after
//! - Record the terminal outcome of every routing decision
//! - Emit synchronously on the request path; this trail is the sole
//!   operational visibility into failover decisions, so no buffering that
//!   could lose records on crash
//!
//! # Design Decisions
//! - A trait, so tests can capture records and deployments can swap sinks
//! - The default sink emits structured tracing events and bumps counters

use crate::observability::metrics;

/// What happened at one point of the routing decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// About to dispatch to a host.
    Attempted,
    /// Terminal success; the session id has been rewritten.
    Created,
    /// Backend answered with a non-success status.
    Failed,
    /// Backend answered but the body could not be interpreted.
    BadResponse,
    /// Transport-level failure (connect, I/O, timeout).
    CommunicationFailure,
    /// No configured version satisfies the request.
    Unsupported,
    /// Every candidate was tried and failed.
    NotCreated,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Attempted => "SESSION_ATTEMPTED",
            Outcome::Created => "SESSION_CREATED",
            Outcome::Failed => "SESSION_FAILED",
            Outcome::BadResponse => "BAD_BACKEND_RESPONSE",
            Outcome::CommunicationFailure => "BACKEND_COMMUNICATION_FAILURE",
            Outcome::Unsupported => "UNSUPPORTED_CAPABILITIES",
            Outcome::NotCreated => "SESSION_NOT_CREATED",
        }
    }
}

/// One audit record.
#[derive(Debug, Clone, Copy)]
pub struct Attempt<'a> {
    pub outcome: Outcome,
    pub user: &'a str,
    pub remote_host: &'a str,
    /// Human-readable capability summary, never used for matching.
    pub capabilities: &'a str,
    /// Route of the host being tried; absent for Unsupported/NotCreated.
    pub route: Option<&'a str>,
    /// 1-based attempt number; absent for Unsupported/NotCreated.
    pub attempt: Option<u32>,
    /// Rewritten session id, present on Created only.
    pub session_id: Option<&'a str>,
    /// Failure detail (backend error, parse error, I/O error).
    pub detail: Option<&'a str>,
}

/// Synchronous audit sink.
pub trait AttemptAudit: Send + Sync {
    fn record(&self, attempt: &Attempt<'_>);
}

/// Default sink: structured tracing events plus attempt/session counters.
#[derive(Debug, Default)]
pub struct TracingAudit;

impl AttemptAudit for TracingAudit {
    fn record(&self, a: &Attempt<'_>) {
        metrics::record_attempt(a.outcome.label());

        match a.outcome {
            Outcome::Attempted => tracing::info!(
                user = a.user,
                remote_host = a.remote_host,
                capabilities = a.capabilities,
                route = a.route,
                attempt = a.attempt,
                "{}",
                a.outcome.label()
            ),
            Outcome::Created => {
                metrics::session_started();
                tracing::info!(
                    user = a.user,
                    remote_host = a.remote_host,
                    capabilities = a.capabilities,
                    route = a.route,
                    session_id = a.session_id,
                    attempt = a.attempt,
                    "{}",
                    a.outcome.label()
                );
            }
            Outcome::Failed | Outcome::Unsupported => tracing::warn!(
                user = a.user,
                remote_host = a.remote_host,
                capabilities = a.capabilities,
                route = a.route,
                attempt = a.attempt,
                detail = a.detail,
                "{}",
                a.outcome.label()
            ),
            Outcome::BadResponse | Outcome::CommunicationFailure | Outcome::NotCreated => {
                tracing::error!(
                    user = a.user,
                    remote_host = a.remote_host,
                    capabilities = a.capabilities,
                    route = a.route,
                    attempt = a.attempt,
                    detail = a.detail,
                    "{}",
                    a.outcome.label()
                )
            }
        }
    }
}
