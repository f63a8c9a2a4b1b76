//! Read-only movie catalog store.
//!
//! This crate provides:
//! - The `CatalogStore` trait consumed by the query façade
//! - Shared filter predicates so result sets and facets never diverge
//! - `MemoryCatalog`, an indexed in-memory snapshot of the collection
//! - JSON snapshot loading
//! - Query metrics and tracing spans

pub mod config;
pub mod error;
pub mod filter;
pub mod memory;
pub mod metrics;
pub mod store;

pub use config::CatalogConfig;
pub use error::{CatalogError, CatalogResult};
pub use filter::{GenreSetFilter, TitleFilter};
pub use memory::MemoryCatalog;
pub use store::CatalogStore;
