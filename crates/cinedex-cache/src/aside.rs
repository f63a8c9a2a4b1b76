//! Cache-aside over any [`CacheLayer`].
//!
//! Look up the key; on a hit, decode and return. On a miss, compute, store
//! with a TTL, and return. The cache never turns a success into a failure:
//! backend errors and undecodable payloads count as misses, and failed writes
//! are logged and dropped.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::layer::CacheLayer;
use crate::metrics::{record_lookup, record_write, LookupResult};

#[derive(Clone)]
pub struct CacheAside {
    layer: Arc<dyn CacheLayer>,
}

impl CacheAside {
    pub fn new(layer: Arc<dyn CacheLayer>) -> Self {
        Self { layer }
    }

    pub fn layer(&self) -> &Arc<dyn CacheLayer> {
        &self.layer
    }

    /// Return the cached value for `key`, or compute, store and return it.
    ///
    /// Errors from `compute` propagate unchanged and nothing is stored.
    pub async fn get_or_compute<T, E, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        compute: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(hit) = self.lookup::<T>(key).await {
            return Ok(hit);
        }

        let value = compute().await?;
        self.store(key, ttl, &value).await;
        Ok(value)
    }

    /// Like [`get_or_compute`](Self::get_or_compute), but an absent result
    /// is returned without being cached.
    pub async fn get_or_compute_some<T, E, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        compute: F,
    ) -> Result<Option<T>, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<T>, E>>,
    {
        if let Some(hit) = self.lookup::<T>(key).await {
            return Ok(Some(hit));
        }

        let value = compute().await?;
        if let Some(found) = &value {
            self.store(key, ttl, found).await;
        }
        Ok(value)
    }

    async fn lookup<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let backend = self.layer.name();

        match self.layer.get(key).await {
            Ok(Some(bytes)) => match serde_json::from_slice::<T>(&bytes) {
                Ok(value) => {
                    debug!(key = key, backend = backend, "Cache HIT");
                    record_lookup(backend, LookupResult::Hit);
                    Some(value)
                }
                Err(e) => {
                    warn!(
                        key = key,
                        backend = backend,
                        error = %e,
                        "Cached payload undecodable, recomputing"
                    );
                    record_lookup(backend, LookupResult::Corrupt);
                    None
                }
            },
            Ok(None) => {
                debug!(key = key, backend = backend, "Cache MISS");
                record_lookup(backend, LookupResult::Miss);
                None
            }
            Err(e) => {
                warn!(
                    key = key,
                    backend = backend,
                    error = %e,
                    "Cache lookup failed, recomputing"
                );
                record_lookup(backend, LookupResult::Error);
                None
            }
        }
    }

    async fn store<T: Serialize>(&self, key: &str, ttl: Duration, value: &T) {
        let backend = self.layer.name();

        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(
                    key = key,
                    backend = backend,
                    error = %e,
                    "Failed to serialize cache payload"
                );
                record_write(backend, false);
                return;
            }
        };

        match self.layer.set_with_ttl(key, bytes, ttl).await {
            Ok(()) => {
                debug!(
                    key = key,
                    backend = backend,
                    ttl_secs = ttl.as_secs(),
                    "Cached result"
                );
                record_write(backend, true);
            }
            Err(e) => {
                warn!(key = key, backend = backend, error = %e, "Cache write failed");
                record_write(backend, false);
            }
        }
    }
}
