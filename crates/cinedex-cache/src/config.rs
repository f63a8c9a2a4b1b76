//! Cache configuration.

use std::str::FromStr;
use std::time::Duration;

use crate::error::CacheError;

/// Freshness window for every cached query result.
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

/// Which cache backend to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheBackend {
    #[default]
    Redis,
    Memory,
    /// Every lookup misses; results are always recomputed.
    Disabled,
}

impl FromStr for CacheBackend {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(CacheBackend::Redis),
            "memory" | "in-memory" => Ok(CacheBackend::Memory),
            "none" | "off" | "disabled" => Ok(CacheBackend::Disabled),
            other => Err(CacheError::config(format!("unknown backend: {other}"))),
        }
    }
}

/// Cache configuration.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    pub redis_url: String,
    /// Prepended to every key written to Redis
    pub key_prefix: String,
    pub ttl: Duration,
    pub connect_timeout: Duration,
    pub command_timeout: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Redis,
            redis_url: "redis://127.0.0.1:6379".to_string(),
            key_prefix: String::new(),
            ttl: DEFAULT_TTL,
            connect_timeout: Duration::from_millis(500),
            command_timeout: Duration::from_millis(250),
        }
    }
}

impl CacheConfig {
    /// Create config from environment variables.
    ///
    /// An unrecognised `CACHE_BACKEND` is a configuration error rather than a
    /// silent fallback.
    pub fn from_env() -> Result<Self, CacheError> {
        let defaults = Self::default();

        let backend = match std::env::var("CACHE_BACKEND") {
            Ok(value) if !value.trim().is_empty() => value.parse()?,
            _ => defaults.backend,
        };

        Ok(Self {
            backend,
            redis_url: std::env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            key_prefix: std::env::var("CACHE_KEY_PREFIX").unwrap_or(defaults.key_prefix),
            ttl: std::env::var("CACHE_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|secs: &u64| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.ttl),
            connect_timeout: std::env::var("CACHE_CONNECT_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.connect_timeout),
            command_timeout: std::env::var("CACHE_COMMAND_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.command_timeout),
        })
    }
}
