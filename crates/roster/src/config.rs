use std::{env, time::Duration};

use roster_core::cache::{KeyScheme, ENTITIES_LIST_KEY, ENTITY_KEY_PREFIX};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Cache TTL in seconds (default: 3600)
    pub cache_ttl_seconds: u64,
    /// Maximum number of cache entries (default: 10,000)
    /// Note: Only used when the `memory` feature is enabled.
    #[allow(dead_code)]
    pub cache_max_entries: usize,
    /// Prefix of per-employee cache keys (default: "entity")
    pub cache_key_prefix: String,
    /// Cache key of the employee list (default: "entities:list")
    pub cache_list_key: String,
    /// Path to SQLite database file (default: "roster.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[allow(dead_code)]
    pub sqlite_path: String,
    /// Redis connection URL (default: "redis://localhost:6379")
    /// Note: Only used when the `redis` feature is enabled.
    #[allow(dead_code)]
    pub redis_url: String,
    /// Deadline for a single repository operation in milliseconds (default: 5000)
    pub operation_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CACHE_TTL_SECONDS` - Cache TTL in seconds (default: 3600)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 10,000)
    /// - `CACHE_KEY_PREFIX` - Per-employee key prefix (default: "entity")
    /// - `CACHE_LIST_KEY` - Employee list key (default: "entities:list")
    /// - `SQLITE_PATH` - SQLite database path (default: "roster.db")
    /// - `REDIS_URL` - Redis connection URL (default: "redis://localhost:6379")
    /// - `OPERATION_TIMEOUT_MS` - Per-operation deadline (default: 5000)
    ///
    /// Unparsable numbers fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parsed = |name: &str| lookup(name).and_then(|v| v.trim().parse().ok());

        Self {
            cache_ttl_seconds: parsed("CACHE_TTL_SECONDS").unwrap_or(3600),
            cache_max_entries: lookup("CACHE_MAX_ENTRIES")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(10_000),
            cache_key_prefix: lookup("CACHE_KEY_PREFIX")
                .unwrap_or_else(|| ENTITY_KEY_PREFIX.to_string()),
            cache_list_key: lookup("CACHE_LIST_KEY")
                .unwrap_or_else(|| ENTITIES_LIST_KEY.to_string()),
            sqlite_path: lookup("SQLITE_PATH").unwrap_or_else(|| "roster.db".to_string()),
            redis_url: lookup("REDIS_URL")
                .unwrap_or_else(|| "redis://localhost:6379".to_string()),
            operation_timeout_ms: parsed("OPERATION_TIMEOUT_MS").unwrap_or(5_000),
        }
    }

    /// Get cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    /// Get the per-operation deadline as a Duration.
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }

    /// Get the cache key naming scheme.
    pub fn key_scheme(&self) -> KeyScheme {
        KeyScheme::new(self.cache_key_prefix.clone(), self.cache_list_key.clone())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();

        assert_eq!(config.cache_ttl_seconds, 3600);
        assert_eq!(config.cache_max_entries, 10_000);
        assert_eq!(config.cache_key_prefix, "entity");
        assert_eq!(config.cache_list_key, "entities:list");
        assert_eq!(config.sqlite_path, "roster.db");
        assert_eq!(config.redis_url, "redis://localhost:6379");
        assert_eq!(config.operation_timeout_ms, 5_000);
    }

    #[test]
    fn test_values_from_variables() {
        let config = config_from(&[
            ("CACHE_TTL_SECONDS", "300"),
            ("CACHE_MAX_ENTRIES", "50"),
            ("CACHE_KEY_PREFIX", "employee"),
            ("CACHE_LIST_KEY", "employees:list"),
            ("SQLITE_PATH", "/tmp/staff.db"),
            ("REDIS_URL", "redis://cache:6379"),
            ("OPERATION_TIMEOUT_MS", "250"),
        ]);

        assert_eq!(config.cache_ttl(), Duration::from_secs(300));
        assert_eq!(config.cache_max_entries, 50);
        assert_eq!(config.sqlite_path, "/tmp/staff.db");
        assert_eq!(config.redis_url, "redis://cache:6379");
        assert_eq!(config.operation_timeout(), Duration::from_millis(250));
        assert_eq!(
            config.key_scheme(),
            KeyScheme::new("employee", "employees:list")
        );
    }

    #[test]
    fn test_unparsable_numbers_fall_back_to_defaults() {
        let config = config_from(&[
            ("CACHE_TTL_SECONDS", "an hour"),
            ("CACHE_MAX_ENTRIES", "-1"),
            ("OPERATION_TIMEOUT_MS", ""),
        ]);

        assert_eq!(config.cache_ttl_seconds, 3600);
        assert_eq!(config.cache_max_entries, 10_000);
        assert_eq!(config.operation_timeout_ms, 5_000);
    }

    #[test]
    fn test_default_key_scheme() {
        assert_eq!(Config::default().key_scheme(), KeyScheme::default());
    }
}
