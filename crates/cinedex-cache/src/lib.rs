//! TTL cache layer for the catalog service.
//!
//! This crate provides:
//! - The `CacheLayer` key/value trait with per-entry TTL
//! - Redis and in-memory backends, plus a no-op backend
//! - `CacheAside`, the get-or-compute-and-store primitive shared by every
//!   cached query, failing open when the cache misbehaves
//! - Cache hit/miss/error metrics

pub mod aside;
pub mod config;
pub mod error;
pub mod key;
pub mod layer;
pub mod memory;
pub mod metrics;
pub mod redis_cache;

pub use aside::CacheAside;
pub use config::{CacheBackend, CacheConfig, DEFAULT_TTL};
pub use error::{CacheError, CacheResult};
pub use key::CacheKey;
pub use layer::{connect, CacheLayer, NoopCache};
pub use memory::{CacheEntry, MemoryCache};
pub use redis_cache::RedisCache;
