//! Configuration Module
//!
//! Handles loading the backing store connection settings from environment variables.

use std::env;

/// Backing store connection parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Redis server host name
    pub host: String,
    /// Redis server port
    pub port: u16,
    /// Logical database index
    pub db: i64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_HOST` - Server host (default: localhost)
    /// - `REDIS_PORT` - Server port (default: 6379)
    /// - `REDIS_DB` - Logical database index (default: 0)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("REDIS_HOST")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.host),
            port: env::var("REDIS_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            db: env::var("REDIS_DB")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.db),
        }
    }

    /// Returns the connection URL, e.g. `redis://localhost:6379/0`.
    pub fn redis_url(&self) -> String {
        format!("redis://{}:{}/{}", self.host, self.port, self.db)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 6379,
            db: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 6379);
        assert_eq!(config.db, 0);
    }

    #[test]
    fn test_redis_url() {
        let config = Config {
            host: "cache.internal".to_string(),
            port: 6380,
            db: 2,
        };
        assert_eq!(config.redis_url(), "redis://cache.internal:6380/2");
        assert_eq!(Config::default().redis_url(), "redis://localhost:6379/0");
    }

    #[test]
    fn test_config_from_env() {
        // Single test touches the env so parallel tests don't race on it
        env::remove_var("REDIS_HOST");
        env::remove_var("REDIS_PORT");
        env::remove_var("REDIS_DB");
        assert_eq!(Config::from_env(), Config::default());

        env::set_var("REDIS_HOST", "10.0.0.5");
        env::set_var("REDIS_PORT", "not-a-port");
        env::set_var("REDIS_DB", "3");
        let config = Config::from_env();
        assert_eq!(config.host, "10.0.0.5");
        assert_eq!(config.port, 6379);
        assert_eq!(config.db, 3);

        env::remove_var("REDIS_HOST");
        env::remove_var("REDIS_PORT");
        env::remove_var("REDIS_DB");
    }
}
