//! The routing engine: capability resolution, retry with exclusion, and
//! session-id rewriting.

use std::sync::Arc;

use crate::http::dispatch::{DispatchError, Dispatcher};
use crate::quota::model::Quotas;
use crate::quota::{resolve_version, WorkingSet};
use crate::routing::audit::{Attempt, AttemptAudit, Outcome};
use crate::routing::{session_id, RoutingError};
use crate::selection::SelectionStrategy;
use crate::wire::SessionMessage;

/// One inbound create-session request, as the engine sees it.
#[derive(Debug)]
pub struct RouteRequest {
    /// Authenticated caller identity.
    pub user: String,
    /// Address the request came from, for the audit trail.
    pub remote_host: String,
    /// Original request path, forwarded verbatim to the chosen host.
    pub path: String,
    /// Parsed request body.
    pub message: SessionMessage,
}

/// Stateless routing engine. All per-request state lives on the stack of
/// [`RoutingEngine::route`]; the engine itself is shared freely.
pub struct RoutingEngine {
    strategy: Arc<dyn SelectionStrategy>,
    dispatcher: Arc<dyn Dispatcher>,
    audit: Arc<dyn AttemptAudit>,
}

impl RoutingEngine {
    pub fn new(
        strategy: Arc<dyn SelectionStrategy>,
        dispatcher: Arc<dyn Dispatcher>,
        audit: Arc<dyn AttemptAudit>,
    ) -> Self {
        Self {
            strategy,
            dispatcher,
            audit,
        }
    }

    /// Route one create-session request.
    ///
    /// Walks the topology until a host issues a session or every candidate
    /// has been excluded. Terminates within the version's total host count:
    /// every failed attempt permanently removes one host from the working
    /// set.
    pub async fn route(
        &self,
        quotas: &Quotas,
        request: RouteRequest,
    ) -> Result<SessionMessage, RoutingError> {
        let mut message = request.message;
        let capabilities = message.desired_capabilities().describe();

        let Some(version) = resolve_version(quotas, &request.user, &message.desired_capabilities())
        else {
            self.audit.record(&Attempt {
                outcome: Outcome::Unsupported,
                user: &request.user,
                remote_host: &request.remote_host,
                capabilities: &capabilities,
                route: None,
                attempt: None,
                session_id: None,
                detail: None,
            });
            return Err(RoutingError::CapabilityMismatch(capabilities));
        };

        // The backend must know exactly which flavor to instantiate.
        message.stamp_version(&version.number);

        tracing::debug!(
            user = request.user,
            version = version.number,
            candidate_hosts = version.total_hosts(),
            "Version resolved"
        );

        let mut working = WorkingSet::new(version);
        let mut attempt: u32 = 0;

        while let Some((region, host)) = working.select(self.strategy.as_ref()) {
            attempt += 1;

            self.audit.record(&Attempt {
                outcome: Outcome::Attempted,
                user: &request.user,
                remote_host: &request.remote_host,
                capabilities: &capabilities,
                route: Some(&host.route),
                attempt: Some(attempt),
                session_id: None,
                detail: None,
            });

            let failure = match self.dispatcher.dispatch(&host.route, &request.path, &message).await
            {
                Ok(reply) if reply.is_success() => match reply.message.session_id() {
                    Some(raw) => {
                        let mut reply_message = reply.message.clone();
                        let rewritten = session_id::encode(&host.route_id, raw);
                        reply_message.set_session_id(rewritten.clone());
                        self.audit.record(&Attempt {
                            outcome: Outcome::Created,
                            user: &request.user,
                            remote_host: &request.remote_host,
                            capabilities: &capabilities,
                            route: Some(&host.route),
                            attempt: Some(attempt),
                            session_id: Some(&rewritten),
                            detail: None,
                        });
                        return Ok(reply_message);
                    }
                    None => (Outcome::BadResponse, "success reply without session id".to_string()),
                },
                Ok(reply) => (
                    Outcome::Failed,
                    reply
                        .message
                        .error_message()
                        .unwrap_or("backend refused the session")
                        .to_string(),
                ),
                Err(DispatchError::MalformedResponse(detail)) => (Outcome::BadResponse, detail),
                Err(DispatchError::Transport(detail)) => (Outcome::CommunicationFailure, detail),
            };

            self.audit.record(&Attempt {
                outcome: failure.0,
                user: &request.user,
                remote_host: &request.remote_host,
                capabilities: &capabilities,
                route: Some(&host.route),
                attempt: Some(attempt),
                session_id: None,
                detail: Some(&failure.1),
            });

            working.exclude(&region, &host.route_id);
        }

        self.audit.record(&Attempt {
            outcome: Outcome::NotCreated,
            user: &request.user,
            remote_host: &request.remote_host,
            capabilities: &capabilities,
            route: None,
            attempt: None,
            session_id: None,
            detail: None,
        });
        Err(RoutingError::Exhausted)
    }
}
