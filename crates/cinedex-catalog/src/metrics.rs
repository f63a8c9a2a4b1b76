//! Catalog query metrics.
//!
//! Provides standardized metrics for monitoring catalog queries:
//! - Query counters by operation and outcome
//! - Latency histograms

use std::future::Future;
use std::time::Instant;

use metrics::{counter, histogram};
use tracing::{debug, debug_span, Instrument};

use crate::error::CatalogResult;

/// Metric name constants for consistency.
pub mod names {
    /// Total catalog queries by operation and outcome.
    pub const QUERIES_TOTAL: &str = "cinedex_catalog_queries_total";

    /// Query latency in seconds by operation.
    pub const QUERY_SECONDS: &str = "cinedex_catalog_query_seconds";
}

/// Record metrics for a completed catalog query.
pub fn record_query(backend: &'static str, operation: &'static str, ok: bool, latency_secs: f64) {
    counter!(
        names::QUERIES_TOTAL,
        "backend" => backend,
        "operation" => operation,
        "outcome" => if ok { "ok" } else { "error" }
    )
    .increment(1);

    histogram!(
        names::QUERY_SECONDS,
        "backend" => backend,
        "operation" => operation
    )
    .record(latency_secs);
}

/// Run a catalog query inside a tracing span and record its outcome.
pub async fn observe<T, F>(
    backend: &'static str,
    operation: &'static str,
    query: F,
) -> CatalogResult<T>
where
    F: Future<Output = CatalogResult<T>>,
{
    let span = debug_span!("catalog_query", backend = backend, operation = operation);
    let start = Instant::now();

    let result = query.instrument(span).await;

    let elapsed = start.elapsed();
    record_query(backend, operation, result.is_ok(), elapsed.as_secs_f64());
    debug!(
        backend = backend,
        operation = operation,
        ok = result.is_ok(),
        latency_ms = elapsed.as_millis() as u64,
        "Catalog query finished"
    );

    result
}
