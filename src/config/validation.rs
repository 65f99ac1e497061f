//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Enforce the route-id invariants the session-id codec relies on:
//!   non-empty, uniform width, unique across the whole topology
//! - Check value ranges (timeouts > 0, routes are valid URLs)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before a config is accepted into the system, including on reload

use std::collections::HashSet;

use thiserror::Error;
use url::Url;

use crate::config::schema::RouterConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("timeout `{0}` must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("duplicate user: {0}")]
    DuplicateUser(String),

    #[error("user {user}: duplicate region {region} in version {version}")]
    DuplicateRegion {
        user: String,
        version: String,
        region: String,
    },

    #[error("user {user}: region {region} has no hosts")]
    EmptyRegion { user: String, region: String },

    #[error("invalid host route {route}: {reason}")]
    InvalidRoute { route: String, reason: String },

    #[error("route id for {route} is empty")]
    EmptyRouteId { route: String },

    #[error("route id {route_id} has width {width}, expected {expected}")]
    RouteIdWidthMismatch {
        route_id: String,
        width: usize,
        expected: usize,
    },

    #[error("route id {0} is used by more than one host")]
    DuplicateRouteId(String),
}

/// Validate a configuration. Collects every problem found.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<std::net::SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    for (value, name) in [
        (config.timeouts.connect_secs, "connect_secs"),
        (config.timeouts.response_secs, "response_secs"),
        (config.timeouts.request_secs, "request_secs"),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout(name));
        }
    }

    let mut users = HashSet::new();
    let mut route_ids = HashSet::new();
    let mut route_id_width: Option<usize> = None;

    for user in &config.users {
        if !users.insert(user.name.as_str()) {
            errors.push(ValidationError::DuplicateUser(user.name.clone()));
        }

        for browser in &user.browsers {
            for version in &browser.versions {
                let mut regions = HashSet::new();
                for region in &version.regions {
                    if !regions.insert(region.name.as_str()) {
                        errors.push(ValidationError::DuplicateRegion {
                            user: user.name.clone(),
                            version: version.number.clone(),
                            region: region.name.clone(),
                        });
                    }
                    if region.hosts.is_empty() {
                        errors.push(ValidationError::EmptyRegion {
                            user: user.name.clone(),
                            region: region.name.clone(),
                        });
                    }
                    for host in &region.hosts {
                        let route = host.route();
                        if let Err(e) = Url::parse(&route) {
                            errors.push(ValidationError::InvalidRoute {
                                route: route.clone(),
                                reason: e.to_string(),
                            });
                        }

                        if host.route_id.is_empty() {
                            errors.push(ValidationError::EmptyRouteId { route });
                            continue;
                        }
                        let width = host.route_id.chars().count();
                        match route_id_width {
                            None => route_id_width = Some(width),
                            Some(expected) if width != expected => {
                                errors.push(ValidationError::RouteIdWidthMismatch {
                                    route_id: host.route_id.clone(),
                                    width,
                                    expected,
                                });
                            }
                            Some(_) => {}
                        }
                        if !route_ids.insert(host.route_id.as_str()) {
                            errors.push(ValidationError::DuplicateRouteId(host.route_id.clone()));
                        }
                    }
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
