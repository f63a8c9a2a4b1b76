//! Cache key derivation.
//!
//! Each cached operation owns one key family; keys for the same logical
//! request are always identical.

use cinedex_models::MovieId;

/// Builders for the keys of cached operations.
pub struct CacheKey;

impl CacheKey {
    pub const TOP_RATED: &'static str = "top_rated";
    pub const RECENT_RELEASED: &'static str = "recent_released";

    pub fn top_rated() -> String {
        Self::TOP_RATED.to_string()
    }

    pub fn recent_released() -> String {
        Self::RECENT_RELEASED.to_string()
    }

    pub fn movie_detail(id: MovieId) -> String {
        format!("movie_detail:{}", id)
    }
}
