//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_sessions_started_total` (counter): sessions successfully created
//! - `router_attempts_total{outcome=...}` (counter): audit records by outcome

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter started"),
        Err(e) => tracing::error!(error = %e, "Failed to start metrics exporter"),
    }
}

/// Bump the session-started counter. Called once per CREATED outcome.
pub fn session_started() {
    metrics::counter!("router_sessions_started_total").increment(1);
}

/// Count one audit record by outcome label.
pub fn record_attempt(outcome: &'static str) {
    metrics::counter!("router_attempts_total", "outcome" => outcome).increment(1);
}
