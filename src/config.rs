//! Service configuration.
//!
//! Loaded from environment variables (and a `.env` file when present).
//!
//! - `DATABASE_URL` - MongoDB connection string (optional)
//! - `DATABASE_NAME` - database holding the catalog collection (optional)
//! - `HOST` - bind address (default: 0.0.0.0)
//! - `PORT` - listen port (default: 8000)
//!
//! Without `DATABASE_URL` and `DATABASE_NAME` the service still starts; read
//! paths answer with empty results and write paths report the store as
//! unavailable.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

const DEFAULT_PORT: u16 = 8000;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

/// Connection settings for the catalog store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,

    /// Present only when both `DATABASE_URL` and `DATABASE_NAME` are set.
    pub database: Option<DatabaseConfig>,

    /// Whether `DATABASE_URL` was set at all, reported by `/test`.
    pub database_url_set: bool,

    /// Whether `DATABASE_NAME` was set at all, reported by `/test`.
    pub database_name_set: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            database: None,
            database_url_set: false,
            database_name_set: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,
            None => DEFAULT_PORT,
        };

        let host = match non_empty("HOST") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HOST".to_string()))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let url = non_empty("DATABASE_URL");
        let name = non_empty("DATABASE_NAME");
        let database_url_set = url.is_some();
        let database_name_set = name.is_some();

        let database = match (url, name) {
            (Some(url), Some(name)) => Some(DatabaseConfig { url, name }),
            _ => None,
        };

        Ok(Self {
            host,
            port,
            database,
            database_url_set,
            database_name_set,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8000");
        assert!(config.database.is_none());
        assert!(!config.database_url_set);
    }

    #[test]
    fn test_database_requires_url_and_name() {
        let config =
            AppConfig::from_lookup(lookup(&[("DATABASE_URL", "mongodb://localhost:27017")]))
                .unwrap();
        assert!(config.database.is_none());
        assert!(config.database_url_set);
        assert!(!config.database_name_set);

        let config = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "mongodb://localhost:27017"),
            ("DATABASE_NAME", "shop"),
            ("PORT", "9100"),
        ]))
        .unwrap();
        assert_eq!(
            config.database,
            Some(DatabaseConfig {
                url: "mongodb://localhost:27017".into(),
                name: "shop".into(),
            })
        );
        assert_eq!(config.port, 9100);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref key) if key == "PORT"));
    }
}
