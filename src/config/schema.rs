//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the session router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration for inbound and outbound calls.
    pub timeouts: TimeoutConfig,

    /// Region/host selection strategy.
    pub selection: SelectionConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Per-user quotas: the full routing topology.
    pub users: Vec<UserConfig>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:4444").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:4444".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout for backend dispatch, in seconds.
    pub connect_secs: u64,

    /// Response timeout for backend dispatch, in seconds.
    pub response_secs: u64,

    /// Total inbound request timeout, in seconds. Must leave room for the
    /// retry loop to walk several hosts.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 10,
            response_secs: 10,
            request_secs: 120,
        }
    }
}

/// Which selection strategy the routing engine uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    Random,
    RoundRobin,
}

/// Selection strategy configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SelectionConfig {
    pub strategy: StrategyKind,
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus metrics exporter.
    pub metrics_enabled: bool,

    /// Address the metrics exporter listens on.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// Quota for a single user: every browser flavor they may request.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserConfig {
    /// User identity as presented by the caller.
    pub name: String,

    #[serde(default)]
    pub browsers: Vec<BrowserConfig>,
}

/// One browser entry in a user's quota.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BrowserConfig {
    /// Browser name, matched exactly against the requested capabilities.
    pub name: String,

    /// Version used when the request does not pin one.
    pub default_version: String,

    #[serde(default)]
    pub versions: Vec<VersionConfig>,
}

/// A deployable backend flavor.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VersionConfig {
    /// Version number. A request matches when this equals or starts with the
    /// requested version string.
    pub number: String,

    #[serde(default)]
    pub regions: Vec<RegionConfig>,
}

/// A named group of interchangeable hosts.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegionConfig {
    pub name: String,

    #[serde(default)]
    pub hosts: Vec<HostConfig>,
}

/// One backend node.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HostConfig {
    /// Host name or address.
    pub host: String,

    /// Backend port.
    pub port: u16,

    /// Stable identifier embedded into session ids issued through this host.
    /// Must be unique across the whole topology and the same width as every
    /// other route id (see validation.rs).
    pub route_id: String,
}

impl HostConfig {
    /// Base URL the backend is dispatched to.
    pub fn route(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
