//! Validation error types.

use thiserror::Error;

pub type ModelResult<T> = Result<T, ValidationError>;

/// Rejections raised before any store or cache access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid movie id: {0} (must be positive)")]
    InvalidMovieId(i64),

    #[error("Malformed movie id: {0:?}")]
    MalformedMovieId(String),

    #[error("Genre label cannot be empty")]
    EmptyGenre,

    #[error("Search text cannot be empty")]
    EmptyQuery,

    #[error("Username cannot be empty")]
    EmptyUsername,

    #[error("Invalid movie record {id}: {reason}")]
    InvalidRecord { id: i64, reason: String },
}

impl ValidationError {
    pub fn invalid_record(id: i64, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            id,
            reason: reason.into(),
        }
    }
}
