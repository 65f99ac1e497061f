//! In-memory topology model.
//!
//! Built once from a validated configuration and shared read-only across all
//! concurrent requests. The shape is `user → browser → version → region →
//! host`; everything below the user level is what the routing engine copies
//! and walks.

use std::collections::HashMap;

use crate::config::schema::{RouterConfig, UserConfig};

/// One backend node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    /// Base URL requests are forwarded to.
    pub route: String,
    /// Stable identifier, unique across the topology, prefixed onto session
    /// ids issued through this host.
    pub route_id: String,
}

/// A named group of hosts considered equally eligible once selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub name: String,
    pub hosts: Vec<Host>,
}

/// One deployable backend flavor and where it is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub number: String,
    pub regions: Vec<Region>,
}

impl Version {
    pub fn total_hosts(&self) -> usize {
        self.regions.iter().map(|r| r.hosts.len()).sum()
    }
}

/// One browser entry in a user's quota.
#[derive(Debug, Clone)]
pub struct Browser {
    pub name: String,
    pub default_version: String,
    pub versions: Vec<Version>,
}

/// Everything one user is allowed to request.
#[derive(Debug, Clone, Default)]
pub struct UserQuota {
    pub browsers: Vec<Browser>,
}

/// Immutable snapshot of every user's quota.
#[derive(Debug, Default)]
pub struct Quotas {
    users: HashMap<String, UserQuota>,
    route_id_width: usize,
}

impl Quotas {
    /// Build a snapshot from a validated configuration.
    pub fn from_config(config: &RouterConfig) -> Self {
        let mut route_id_width = 0;
        let users = config
            .users
            .iter()
            .map(|user| (user.name.clone(), build_user(user, &mut route_id_width)))
            .collect();
        Self {
            users,
            route_id_width,
        }
    }

    pub fn user(&self, name: &str) -> Option<&UserQuota> {
        self.users.get(name)
    }

    /// Width every route id in this topology has. Zero when the topology is
    /// empty.
    pub fn route_id_width(&self) -> usize {
        self.route_id_width
    }
}

fn build_user(user: &UserConfig, route_id_width: &mut usize) -> UserQuota {
    let browsers = user
        .browsers
        .iter()
        .map(|browser| Browser {
            name: browser.name.clone(),
            default_version: browser.default_version.clone(),
            versions: browser
                .versions
                .iter()
                .map(|version| Version {
                    number: version.number.clone(),
                    regions: version
                        .regions
                        .iter()
                        .map(|region| Region {
                            name: region.name.clone(),
                            hosts: region
                                .hosts
                                .iter()
                                .map(|host| {
                                    *route_id_width = host.route_id.chars().count();
                                    Host {
                                        route: host.route(),
                                        route_id: host.route_id.clone(),
                                    }
                                })
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();
    UserQuota { browsers }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn host(route: &str, route_id: &str) -> Host {
        Host {
            route: route.to_string(),
            route_id: route_id.to_string(),
        }
    }

    pub fn region(name: &str, hosts: Vec<Host>) -> Region {
        Region {
            name: name.to_string(),
            hosts,
        }
    }

    pub fn version(number: &str, regions: Vec<Region>) -> Version {
        Version {
            number: number.to_string(),
            regions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{
        BrowserConfig, HostConfig, RegionConfig, RouterConfig, UserConfig, VersionConfig,
    };

    #[test]
    fn test_snapshot_built_from_config() {
        let config = RouterConfig {
            users: vec![UserConfig {
                name: "bob".into(),
                browsers: vec![BrowserConfig {
                    name: "chrome".into(),
                    default_version: "40".into(),
                    versions: vec![VersionConfig {
                        number: "40.0.2".into(),
                        regions: vec![RegionConfig {
                            name: "us-east".into(),
                            hosts: vec![HostConfig {
                                host: "node1".into(),
                                port: 4444,
                                route_id: "deadbeef".into(),
                            }],
                        }],
                    }],
                }],
            }],
            ..RouterConfig::default()
        };

        let quotas = Quotas::from_config(&config);
        let user = quotas.user("bob").unwrap();
        let version = &user.browsers[0].versions[0];
        assert_eq!(version.number, "40.0.2");
        assert_eq!(version.regions[0].hosts[0].route, "http://node1:4444");
        assert_eq!(version.total_hosts(), 1);
        assert_eq!(quotas.route_id_width(), 8);
        assert!(quotas.user("alice").is_none());
    }
}
