//! Server configuration
//!
//! Defaults first, then `COMMUNITY_*` environment variables
//! (e.g. `COMMUNITY_BIND_ADDRESS=127.0.0.1:8080`).

use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::net::SocketAddr;

const ENV_PREFIX: &str = "COMMUNITY";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bind_address: String,
    pub database_url: String,
    pub max_connections: u32,
    /// Name of the business operation the interop service sends to
    pub interop_target: String,
    /// When set, the interop operation forwards requests to this base URL
    /// instead of echoing them back
    #[serde(default)]
    pub interop_target_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .set_default("bind_address", "0.0.0.0:2188")?
            .set_default("database_url", "sqlite://community.db")?
            .set_default("max_connections", 5)?
            .set_default("interop_target", "BO")?
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        config.try_deserialize()
    }

    /// Check the loaded values and resolve the listen address.
    pub fn validate(&self) -> Result<SocketAddr> {
        if self.database_url.is_empty() {
            return Err(anyhow!("Database URL is required"));
        }

        if self.max_connections == 0 {
            return Err(anyhow!("max_connections must be greater than 0"));
        }

        if self.interop_target.is_empty() {
            return Err(anyhow!("Interop target name is required"));
        }

        self.bind_address
            .parse()
            .map_err(|e| anyhow!("Invalid bind address '{}': {}", self.bind_address, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        Config {
            bind_address: "127.0.0.1:2188".to_string(),
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            interop_target: "BO".to_string(),
            interop_target_url: None,
        }
    }

    #[test]
    fn test_config_validation() {
        let addr = sample().validate().unwrap();
        assert_eq!(addr.port(), 2188);
    }

    #[test]
    fn test_invalid_bind_address() {
        let mut config = sample();
        config.bind_address = "not-an-address".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_connections() {
        let mut config = sample();
        config.max_connections = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_defaults() {
        // Only meaningful when no COMMUNITY_* overrides are exported
        if std::env::vars().any(|(k, _)| k.starts_with("COMMUNITY_")) {
            return;
        }
        let config = Config::from_env().unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:2188");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.interop_target, "BO");
        assert!(config.interop_target_url.is_none());
    }
}
