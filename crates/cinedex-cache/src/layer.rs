//! The cache layer abstraction and backend selection.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::config::{CacheBackend, CacheConfig};
use crate::error::CacheResult;
use crate::memory::MemoryCache;
use crate::redis_cache::RedisCache;

/// Key/value store of serialized payloads with per-entry TTL.
///
/// Implementations never interpret the payload. A lookup for an expired
/// entry must report absence.
#[async_trait]
pub trait CacheLayer: Send + Sync {
    /// Backend name used in logs and metric labels.
    fn name(&self) -> &'static str;

    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>>;

    async fn set_with_ttl(&self, key: &str, value: Vec<u8>, ttl: Duration) -> CacheResult<()>;
}

/// Cache that never stores anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCache;

#[async_trait]
impl CacheLayer for NoopCache {
    fn name(&self) -> &'static str {
        "none"
    }

    async fn get(&self, _key: &str) -> CacheResult<Option<Vec<u8>>> {
        Ok(None)
    }

    async fn set_with_ttl(&self, _key: &str, _value: Vec<u8>, _ttl: Duration) -> CacheResult<()> {
        Ok(())
    }
}

/// Build the configured cache backend.
///
/// Redis is connected lazily, so an unreachable server does not fail
/// startup; lookups simply miss until it comes back.
pub fn connect(config: &CacheConfig) -> CacheResult<Arc<dyn CacheLayer>> {
    let layer: Arc<dyn CacheLayer> = match config.backend {
        CacheBackend::Redis => Arc::new(RedisCache::new(config)?),
        CacheBackend::Memory => Arc::new(MemoryCache::new()),
        CacheBackend::Disabled => Arc::new(NoopCache),
    };

    info!(
        backend = layer.name(),
        ttl_secs = config.ttl.as_secs(),
        "Cache layer ready"
    );
    Ok(layer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_cache_always_misses() {
        let cache = NoopCache;
        cache
            .set_with_ttl("top_rated", b"[]".to_vec(), Duration::from_secs(600))
            .await
            .unwrap();
        assert_eq!(cache.get("top_rated").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_connect_selects_backend() {
        let config = CacheConfig {
            backend: CacheBackend::Memory,
            ..Default::default()
        };
        assert_eq!(connect(&config).unwrap().name(), "memory");

        let config = CacheConfig {
            backend: CacheBackend::Disabled,
            ..Default::default()
        };
        assert_eq!(connect(&config).unwrap().name(), "none");
    }

    #[tokio::test]
    async fn test_connect_redis_is_lazy() {
        let config = CacheConfig {
            backend: CacheBackend::Redis,
            redis_url: "redis://127.0.0.1:1".to_string(),
            ..Default::default()
        };
        assert_eq!(connect(&config).unwrap().name(), "redis");
    }
}
