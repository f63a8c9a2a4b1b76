//! Query error types.

use cinedex_catalog::CatalogError;
use cinedex_models::ValidationError;
use thiserror::Error;

pub type QueryResult<T> = Result<T, QueryError>;

/// Failures surfaced to callers of the query façade.
///
/// A missing movie is not an error (operations return `Ok(None)`), and cache
/// failures never reach this type.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error("Catalog store unavailable: {0}")]
    StoreUnavailable(#[from] CatalogError),

    #[error("Query cancelled")]
    Cancelled,

    #[error("Query deadline exceeded")]
    DeadlineExceeded,

    #[error("Collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),
}

impl QueryError {
    /// True if the caller sent a bad request.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, QueryError::InvalidInput(_))
    }

    /// True if the query was abandoned by the caller's cancellation or deadline.
    pub fn is_aborted(&self) -> bool {
        matches!(self, QueryError::Cancelled | QueryError::DeadlineExceeded)
    }
}

/// Failure reported by an external likes or recommendation provider.
#[derive(Debug, Error)]
#[error("{provider}: {message}")]
pub struct CollaboratorError {
    pub provider: &'static str,
    pub message: String,
}

impl CollaboratorError {
    pub fn new(provider: &'static str, message: impl Into<String>) -> Self {
        Self {
            provider,
            message: message.into(),
        }
    }
}
