//! HTTP server setup and the create-session handler.
//!
//! # Responsibilities
//! - Create the Axum router and wire up middleware (trace, timeout,
//!   request id)
//! - Extract the caller identity and remote address
//! - Hand the parsed request to the routing engine
//! - Serialize the engine's verdict back onto the wire
//! - Apply hot-reloaded topology snapshots atomically
//!
//! Cancellation: when the client disconnects, Axum drops the handler future,
//! which aborts any in-flight backend dispatch; no further attempts are made.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{
    body::Bytes,
    extract::{ConnectInfo, OriginalUri, State},
    http::{header, HeaderMap, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use uuid::Uuid;

use crate::config::RouterConfig;
use crate::http::dispatch::HttpDispatcher;
use crate::quota::Quotas;
use crate::routing::{RouteRequest, RoutingEngine, TracingAudit};
use crate::selection;
use crate::wire::SessionMessage;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RoutingEngine>,
    pub quotas: Arc<ArcSwap<Quotas>>,
}

/// HTTP server for the session router.
pub struct HttpServer {
    router: Router,
    quotas: Arc<ArcSwap<Quotas>>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RouterConfig) -> Result<Self, reqwest::Error> {
        let quotas = Arc::new(ArcSwap::from_pointee(Quotas::from_config(&config)));
        let engine = Arc::new(RoutingEngine::new(
            selection::from_config(&config.selection),
            Arc::new(HttpDispatcher::new(&config.timeouts)?),
            Arc::new(TracingAudit),
        ));

        let state = AppState {
            engine,
            quotas: quotas.clone(),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, quotas })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RouterConfig, state: AppState) -> Router {
        Router::new()
            .route("/wd/hub/session", post(create_session))
            .route("/ping", get(ping))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    )))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// Run the server until shutdown, applying topology updates as they
    /// arrive.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<RouterConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        // Topology updates swap atomically; requests already in flight keep
        // the snapshot they copied from. Listener/timeout changes need a
        // restart and are deliberately ignored here.
        let quotas = self.quotas.clone();
        tokio::spawn(async move {
            while let Some(new_config) = config_updates.recv().await {
                quotas.store(Arc::new(Quotas::from_config(&new_config)));
                tracing::info!(users = new_config.users.len(), "Topology snapshot swapped");
            }
        });

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("Shutdown signal (ctrl-c) received");
                    }
                    _ = shutdown.recv() => {
                        tracing::info!("Shutdown triggered");
                    }
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Create-session handler: the only routed endpoint.
async fn create_session(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let message = match SessionMessage::from_slice(&body) {
        Ok(message) => message,
        Err(e) => {
            return reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                &SessionMessage::error(&format!("Cannot parse session request: {e}")),
            );
        }
    };

    let request = RouteRequest {
        user: caller_identity(&headers),
        remote_host: addr.ip().to_string(),
        path: uri.path().to_string(),
        message,
    };

    let quotas = state.quotas.load_full();
    match state.engine.route(&quotas, request).await {
        Ok(message) => reply(StatusCode::OK, &message),
        Err(e) => reply(
            StatusCode::INTERNAL_SERVER_ERROR,
            &SessionMessage::error(&e.to_string()),
        ),
    }
}

async fn ping() -> &'static str {
    "pong"
}

fn reply(status: StatusCode, message: &SessionMessage) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        serde_json::to_string(message).unwrap_or_default(),
    )
        .into_response()
}

/// Caller identity from the Basic Authorization header username.
///
/// Password verification belongs to the deployment in front of this router;
/// only the identity is read here.
fn caller_identity(headers: &HeaderMap) -> String {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Basic "))
        .and_then(|v| BASE64.decode(v).ok())
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .and_then(|credentials| {
            credentials
                .split(':')
                .next()
                .filter(|user| !user.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "anonymous".to_string())
}

/// Request-id source for the middleware stack.
#[derive(Clone, Copy, Default)]
struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_identity_from_basic_auth() {
        let mut headers = HeaderMap::new();
        // "bob:secret"
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic Ym9iOnNlY3JldA=="),
        );
        assert_eq!(caller_identity(&headers), "bob");
    }

    #[test]
    fn test_missing_auth_is_anonymous() {
        assert_eq!(caller_identity(&HeaderMap::new()), "anonymous");
    }

    #[test]
    fn test_garbage_auth_is_anonymous() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic not-base64!!!"),
        );
        assert_eq!(caller_identity(&headers), "anonymous");
    }
}
