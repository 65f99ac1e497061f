//! Capability-to-version resolution.
//!
//! # Responsibilities
//! - Pure lookup: (user, capabilities) → Version or None
//! - No match is a normal outcome, not an error
//!
//! # Design Decisions
//! - Browser name is matched exactly
//! - An absent or empty requested version resolves to the browser's
//!   configured default
//! - Otherwise a configured version matches when its number equals or starts
//!   with the requested string, so "40" matches "40.0.2"

use crate::quota::model::{Quotas, Version};
use crate::wire::Capabilities;

/// Find the best matching version for a user's requested capabilities.
pub fn resolve_version<'a>(
    quotas: &'a Quotas,
    user: &str,
    capabilities: &Capabilities<'_>,
) -> Option<&'a Version> {
    let quota = quotas.user(user)?;
    let browser_name = capabilities.browser_name()?;
    let browser = quota.browsers.iter().find(|b| b.name == browser_name)?;

    let requested = capabilities
        .version()
        .unwrap_or(browser.default_version.as_str());
    browser
        .versions
        .iter()
        .find(|v| v.number.starts_with(requested))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{
        BrowserConfig, HostConfig, RegionConfig, RouterConfig, UserConfig, VersionConfig,
    };
    use crate::wire::SessionMessage;

    fn quotas() -> Quotas {
        let version = |number: &str| VersionConfig {
            number: number.into(),
            regions: vec![RegionConfig {
                name: "us".into(),
                hosts: vec![HostConfig {
                    host: "node1".into(),
                    port: 4444,
                    route_id: format!("{number:>8}"),
                }],
            }],
        };
        Quotas::from_config(&RouterConfig {
            users: vec![UserConfig {
                name: "bob".into(),
                browsers: vec![BrowserConfig {
                    name: "chrome".into(),
                    default_version: "41".into(),
                    versions: vec![version("40.0.2"), version("41.0.1")],
                }],
            }],
            ..RouterConfig::default()
        })
    }

    fn caps(raw: &str) -> SessionMessage {
        SessionMessage::from_slice(raw.as_bytes()).unwrap()
    }

    #[test]
    fn test_version_prefix_match() {
        let quotas = quotas();
        let msg = caps(r#"{"desiredCapabilities":{"browserName":"chrome","version":"40"}}"#);
        let version = resolve_version(&quotas, "bob", &msg.desired_capabilities()).unwrap();
        assert_eq!(version.number, "40.0.2");
    }

    #[test]
    fn test_missing_version_uses_default() {
        let quotas = quotas();
        let msg = caps(r#"{"desiredCapabilities":{"browserName":"chrome"}}"#);
        let version = resolve_version(&quotas, "bob", &msg.desired_capabilities()).unwrap();
        assert_eq!(version.number, "41.0.1");
    }

    #[test]
    fn test_unknown_browser_is_none() {
        let quotas = quotas();
        let msg = caps(r#"{"desiredCapabilities":{"browserName":"safari"}}"#);
        assert!(resolve_version(&quotas, "bob", &msg.desired_capabilities()).is_none());
    }

    #[test]
    fn test_unknown_user_is_none() {
        let quotas = quotas();
        let msg = caps(r#"{"desiredCapabilities":{"browserName":"chrome"}}"#);
        assert!(resolve_version(&quotas, "alice", &msg.desired_capabilities()).is_none());
    }

    #[test]
    fn test_unmatched_version_is_none() {
        let quotas = quotas();
        let msg = caps(r#"{"desiredCapabilities":{"browserName":"chrome","version":"99"}}"#);
        assert!(resolve_version(&quotas, "bob", &msg.desired_capabilities()).is_none());
    }
}
