//! Façade operation metrics.

use std::future::Future;
use std::time::Instant;

use metrics::{counter, histogram};
use tracing::{info, warn};

use crate::error::{QueryError, QueryResult};

/// Metric name constants for consistency.
pub mod names {
    /// Façade operations by name and outcome.
    pub const OPERATIONS_TOTAL: &str = "cinedex_query_operations_total";

    /// Façade operation latency in seconds.
    pub const OPERATION_SECONDS: &str = "cinedex_query_operation_seconds";
}

fn outcome(error: Option<&QueryError>) -> &'static str {
    match error {
        None => "ok",
        Some(QueryError::InvalidInput(_)) => "invalid_input",
        Some(QueryError::StoreUnavailable(_)) => "store_unavailable",
        Some(QueryError::Cancelled) => "cancelled",
        Some(QueryError::DeadlineExceeded) => "deadline_exceeded",
        Some(QueryError::Collaborator(_)) => "collaborator_error",
    }
}

pub fn record_operation(operation: &'static str, outcome: &'static str, latency_secs: f64) {
    counter!(
        names::OPERATIONS_TOTAL,
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);

    histogram!(names::OPERATION_SECONDS, "operation" => operation).record(latency_secs);
}

/// Time a façade operation and log its outcome.
pub async fn observe<T, F>(operation: &'static str, fut: F) -> QueryResult<T>
where
    F: Future<Output = QueryResult<T>>,
{
    let start = Instant::now();
    let result = fut.await;
    let elapsed = start.elapsed();

    let label = outcome(result.as_ref().err());
    record_operation(operation, label, elapsed.as_secs_f64());

    match &result {
        Ok(_) => info!(
            operation = operation,
            latency_ms = elapsed.as_millis() as u64,
            "Query served"
        ),
        Err(e) => warn!(
            operation = operation,
            outcome = label,
            error = %e,
            latency_ms = elapsed.as_millis() as u64,
            "Query failed"
        ),
    }

    result
}
