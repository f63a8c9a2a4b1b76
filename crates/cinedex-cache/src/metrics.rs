//! Cache metrics.

use metrics::counter;

/// Metric name constants for consistency.
pub mod names {
    /// Cache lookups by backend and result (hit, miss, error, corrupt).
    pub const REQUESTS_TOTAL: &str = "cinedex_cache_requests_total";

    /// Cache writes by backend and outcome.
    pub const WRITES_TOTAL: &str = "cinedex_cache_writes_total";
}

/// Outcome of a single cache lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupResult {
    Hit,
    Miss,
    /// The backend failed; treated as a miss.
    Error,
    /// The stored payload could not be decoded; treated as a miss.
    Corrupt,
}

impl LookupResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupResult::Hit => "hit",
            LookupResult::Miss => "miss",
            LookupResult::Error => "error",
            LookupResult::Corrupt => "corrupt",
        }
    }
}

pub fn record_lookup(backend: &'static str, result: LookupResult) {
    counter!(
        names::REQUESTS_TOTAL,
        "backend" => backend,
        "result" => result.as_str()
    )
    .increment(1);
}

pub fn record_write(backend: &'static str, ok: bool) {
    counter!(
        names::WRITES_TOTAL,
        "backend" => backend,
        "outcome" => if ok { "ok" } else { "error" }
    )
    .increment(1);
}
