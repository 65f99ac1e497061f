//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: RouterConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_quota_file_parses() {
        let raw = r#"
            [[users]]
            name = "bob"

            [[users.browsers]]
            name = "chrome"
            default_version = "40"

            [[users.browsers.versions]]
            number = "40.0.2"

            [[users.browsers.versions.regions]]
            name = "us-east"

            [[users.browsers.versions.regions.hosts]]
            host = "node1.example.org"
            port = 4444
            route_id = "deadbeef"
        "#;
        let config: RouterConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.users.len(), 1);
        assert_eq!(config.users[0].browsers[0].versions[0].regions[0].hosts[0].route_id, "deadbeef");
        assert_eq!(config.timeouts.connect_secs, 10);
        assert!(validate_config(&config).is_ok());
    }
}
