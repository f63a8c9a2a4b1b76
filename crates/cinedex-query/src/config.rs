//! Query façade configuration.

use std::time::Duration;

use cinedex_cache::DEFAULT_TTL;

/// List limits and vote thresholds for the façade operations.
#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// Top-rated list length
    pub top_rated_limit: usize,
    /// Inclusive vote_count threshold for the top-rated list
    pub top_rated_min_votes: u64,
    /// Recent list length
    pub recent_limit: usize,
    /// Exclusive vote_count threshold for the recent list
    pub recent_min_votes: u64,
    /// Similar-movie list length
    pub similar_limit: usize,
    /// Exclusive vote_count threshold for similar movies
    pub similar_min_votes: u64,
    /// Maximum recommendations returned per user
    pub recommendations_limit: usize,
    /// TTL of cached reference lists and movie details
    pub cache_ttl: Duration,
    /// Per-request deadline applied by the binary
    pub request_timeout: Option<Duration>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            top_rated_limit: 25,
            top_rated_min_votes: 5000,
            recent_limit: 50,
            recent_min_votes: 50,
            similar_limit: 10,
            similar_min_votes: 500,
            recommendations_limit: 10,
            cache_ttl: DEFAULT_TTL,
            request_timeout: None,
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|s| s.trim().parse().ok())
}

impl QueryConfig {
    /// Create config from environment variables.
    ///
    /// The cache TTL is owned by the cache configuration; use
    /// [`with_cache_ttl`](Self::with_cache_ttl) to carry it over.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            top_rated_limit: env_parse("TOP_RATED_LIMIT").unwrap_or(defaults.top_rated_limit),
            top_rated_min_votes: env_parse("TOP_RATED_MIN_VOTES")
                .unwrap_or(defaults.top_rated_min_votes),
            recent_limit: env_parse("RECENT_LIMIT").unwrap_or(defaults.recent_limit),
            recent_min_votes: env_parse("RECENT_MIN_VOTES").unwrap_or(defaults.recent_min_votes),
            similar_limit: env_parse("SIMILAR_LIMIT").unwrap_or(defaults.similar_limit),
            similar_min_votes: env_parse("SIMILAR_MIN_VOTES").unwrap_or(defaults.similar_min_votes),
            recommendations_limit: env_parse("RECOMMENDATIONS_LIMIT")
                .unwrap_or(defaults.recommendations_limit),
            cache_ttl: defaults.cache_ttl,
            request_timeout: env_parse::<u64>("QUERY_TIMEOUT_MS")
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis),
        }
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }
}
