//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_DATA_DIR` - Directory for persisted session/shop records (default: ./data)
//! - `STOREFRONT_CATALOG_PATH` - JSON product catalog (default: bundled fixture)
//! - `STOREFRONT_ROSTER_PATH` - JSON list of known accounts (default: demo accounts)
//! - `STOREFRONT_ALLOW_UNKNOWN_LOGIN` - Accept unregistered emails (default: true)
//! - `STOREFRONT_CHAT_DELAY_MS` - Simulated chat typing delay (default: 1000)
//! - `COLLABORATOR_BASE_URL` - Recommendation/search API (default: http://localhost:8000)
//! - `COLLABORATOR_TIMEOUT_SECS` - Request timeout (default: 10)
//! - `COLLABORATOR_CACHE_TTL_SECS` - Product cache TTL (default: 300)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0-1.0 (default: 1.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::catalog::Catalog;
use crate::services::{Roster, UnknownEmailPolicy};

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Invalid file {0}: {1}")]
    InvalidFile(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory of the file-backed local store
    pub data_dir: PathBuf,
    /// Replacement product catalog
    pub catalog_path: Option<PathBuf>,
    /// Replacement account roster
    pub roster_path: Option<PathBuf>,
    /// Handling of logins for emails not on the roster
    pub unknown_email_policy: UnknownEmailPolicy,
    /// Delay before a chat reply is returned
    pub chat_delay: Duration,
    /// Recommendation/search collaborator
    pub collaborator: CollaboratorConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
}

/// Recommendation/search collaborator configuration.
#[derive(Debug, Clone)]
pub struct CollaboratorConfig {
    /// Base URL all endpoint paths are joined onto
    pub base_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
    /// TTL of cached product responses
    pub cache_ttl: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let sentry_sample_rate = env.parse("SENTRY_SAMPLE_RATE", 1.0_f32)?;
        if !(0.0..=1.0).contains(&sentry_sample_rate) {
            return Err(ConfigError::InvalidEnvVar(
                "SENTRY_SAMPLE_RATE".to_string(),
                "must be between 0.0 and 1.0".to_string(),
            ));
        }

        Ok(Self {
            host: env.parse("STOREFRONT_HOST", IpAddr::from([127, 0, 0, 1]))?,
            port: env.parse("STOREFRONT_PORT", 3000)?,
            data_dir: env
                .optional("STOREFRONT_DATA_DIR")
                .map_or_else(|| PathBuf::from("data"), PathBuf::from),
            catalog_path: env.optional("STOREFRONT_CATALOG_PATH").map(PathBuf::from),
            roster_path: env.optional("STOREFRONT_ROSTER_PATH").map(PathBuf::from),
            unknown_email_policy: if env.parse_bool("STOREFRONT_ALLOW_UNKNOWN_LOGIN", true)? {
                UnknownEmailPolicy::Accept
            } else {
                UnknownEmailPolicy::Reject
            },
            chat_delay: Duration::from_millis(env.parse("STOREFRONT_CHAT_DELAY_MS", 1000)?),
            collaborator: CollaboratorConfig::from_env_lookup(&env)?,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// The configured roster, or the demo accounts.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidFile` if the roster file cannot be read
    /// or parsed.
    pub fn load_roster(&self) -> Result<Roster, ConfigError> {
        let Some(path) = &self.roster_path else {
            return Ok(Roster::demo());
        };
        let invalid = |e: &dyn std::fmt::Display| {
            ConfigError::InvalidFile(path.display().to_string(), e.to_string())
        };
        let raw = std::fs::read_to_string(path).map_err(|e| invalid(&e))?;
        Roster::from_json(&raw).map_err(|e| invalid(&e))
    }

    /// The configured catalog, or the bundled fixture.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidFile` if the catalog cannot be loaded.
    pub fn load_catalog(&self) -> Result<Catalog, ConfigError> {
        match &self.catalog_path {
            Some(path) => Catalog::from_file(path)
                .map_err(|e| ConfigError::InvalidFile(path.display().to_string(), e.to_string())),
            None => Catalog::builtin()
                .map_err(|e| ConfigError::InvalidFile("<bundled catalog>".to_string(), e.to_string())),
        }
    }
}

impl CollaboratorConfig {
    fn from_env_lookup(env: &Env<'_>) -> Result<Self, ConfigError> {
        let raw_url = env
            .optional("COLLABORATOR_BASE_URL")
            .unwrap_or_else(|| "http://localhost:8000".to_string());
        let base_url = Url::parse(&raw_url).map_err(|e| {
            ConfigError::InvalidEnvVar("COLLABORATOR_BASE_URL".to_string(), e.to_string())
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEnvVar(
                "COLLABORATOR_BASE_URL".to_string(),
                format!("unsupported scheme {}", base_url.scheme()),
            ));
        }

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(env.parse("COLLABORATOR_TIMEOUT_SECS", 10)?),
            cache_ttl: Duration::from_secs(env.parse("COLLABORATOR_CACHE_TTL_SECS", 300)?),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup with typed accessors.
struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    /// Get an optional, non-blank variable.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map_or(Ok(default), |raw| {
            raw.parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }

    /// Parse a boolean flag (`true/false`, `1/0`, `yes/no`, `on/off`).
    fn parse_bool(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        let Some(raw) = self.optional(key) else {
            return Ok(default);
        };
        match raw.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                format!("expected a boolean, got {raw:?}"),
            )),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.unknown_email_policy, UnknownEmailPolicy::Accept);
        assert_eq!(config.chat_delay, Duration::from_millis(1000));
        assert_eq!(config.collaborator.base_url.as_str(), "http://localhost:8000/");
        assert_eq!(config.collaborator.timeout, Duration::from_secs(10));
        assert_eq!(config.collaborator.cache_ttl, Duration::from_secs(300));
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("STOREFRONT_HOST", "0.0.0.0"),
            ("STOREFRONT_PORT", "8080"),
            ("STOREFRONT_DATA_DIR", "/var/lib/shopfront"),
            ("STOREFRONT_ALLOW_UNKNOWN_LOGIN", "no"),
            ("STOREFRONT_CHAT_DELAY_MS", "0"),
            ("COLLABORATOR_BASE_URL", "https://reco.example.com/api"),
            ("SENTRY_DSN", "  "),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/shopfront"));
        assert_eq!(config.unknown_email_policy, UnknownEmailPolicy::Reject);
        assert_eq!(config.chat_delay, Duration::ZERO);
        assert_eq!(config.collaborator.base_url.host_str(), Some("reco.example.com"));
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config_from(&[("STOREFRONT_PORT", "eighty")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "STOREFRONT_PORT"
        ));
        assert!(matches!(
            config_from(&[("STOREFRONT_ALLOW_UNKNOWN_LOGIN", "maybe")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "STOREFRONT_ALLOW_UNKNOWN_LOGIN"
        ));
        assert!(matches!(
            config_from(&[("COLLABORATOR_BASE_URL", "ftp://files.example.com")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "COLLABORATOR_BASE_URL"
        ));
        assert!(matches!(
            config_from(&[("SENTRY_SAMPLE_RATE", "1.5")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "SENTRY_SAMPLE_RATE"
        ));
    }

    #[test]
    fn test_default_roster_and_catalog() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.load_roster().unwrap().len(), 2);
        assert_eq!(config.load_catalog().unwrap().len(), 12);
    }

    #[test]
    fn test_missing_roster_file() {
        let config = config_from(&[("STOREFRONT_ROSTER_PATH", "/nonexistent/roster.json")]).unwrap();
        assert!(matches!(
            config.load_roster(),
            Err(ConfigError::InvalidFile(path, _)) if path == "/nonexistent/roster.json"
        ));
    }
}
