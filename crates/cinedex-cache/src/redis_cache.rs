//! Redis cache backend.
//!
//! Uses a single multiplexed connection, established on first use and
//! dropped after a connection-level failure so the next call reconnects.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::config::CacheConfig;
use crate::error::{CacheError, CacheResult};
use crate::layer::CacheLayer;

pub struct RedisCache {
    client: redis::Client,
    key_prefix: String,
    connect_timeout: Duration,
    command_timeout: Duration,
    conn: RwLock<Option<MultiplexedConnection>>,
}

impl RedisCache {
    pub fn new(config: &CacheConfig) -> CacheResult<Self> {
        let client = redis::Client::open(config.redis_url.as_str())?;
        Ok(Self {
            client,
            key_prefix: config.key_prefix.clone(),
            connect_timeout: config.connect_timeout,
            command_timeout: config.command_timeout,
            conn: RwLock::new(None),
        })
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }

    async fn connection(&self) -> CacheResult<MultiplexedConnection> {
        // Fast path: read lock
        if let Some(conn) = self.conn.read().await.as_ref() {
            return Ok(conn.clone());
        }

        // Slow path: connect under write lock (double-check)
        let mut slot = self.conn.write().await;
        if let Some(conn) = slot.as_ref() {
            return Ok(conn.clone());
        }

        debug!("Connecting to Redis");
        let conn = tokio::time::timeout(
            self.connect_timeout,
            self.client.get_multiplexed_async_connection(),
        )
        .await
        .map_err(|_| CacheError::timeout("connecting to redis"))??;

        *slot = Some(conn.clone());
        Ok(conn)
    }

    /// Run a command with the command timeout, resetting the connection on
    /// connection-level failures.
    async fn run<T, F, Fut>(&self, op: &'static str, command: F) -> CacheResult<T>
    where
        F: FnOnce(MultiplexedConnection) -> Fut,
        Fut: Future<Output = redis::RedisResult<T>>,
    {
        let conn = self.connection().await?;

        let result = match tokio::time::timeout(self.command_timeout, command(conn)).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(CacheError::from(e)),
            Err(_) => Err(CacheError::timeout(op)),
        };

        if let Err(e) = &result {
            if e.is_connection_error() {
                warn!(op = op, error = %e, "Redis connection failed, will reconnect");
                *self.conn.write().await = None;
            }
        }

        result
    }
}

#[async_trait]
impl CacheLayer for RedisCache {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        let key = self.full_key(key);
        self.run("GET", |mut conn| async move {
            let value: Option<Vec<u8>> = conn.get(&key).await?;
            Ok(value)
        })
        .await
    }

    async fn set_with_ttl(&self, key: &str, value: Vec<u8>, ttl: Duration) -> CacheResult<()> {
        let key = self.full_key(key);
        // SET EX rejects a zero expiry.
        let ttl_secs = ttl.as_secs().max(1);
        self.run("SET", |mut conn| async move {
            let _: () = conn.set_ex(&key, value, ttl_secs).await?;
            Ok(())
        })
        .await
    }
}
