//! Shared data models for the Cinedex catalog service.
//!
//! This crate provides Serde-serializable types for:
//! - Movie records and their list projections
//! - Search results with genre, release-year and vote facets
//! - Similar-movie recommendations
//! - Composite page views assembled by the query façade
//! - Input validation errors

pub mod error;
pub mod facet;
pub mod movie;
pub mod page;

// Re-export common types
pub use error::{ModelResult, ValidationError};
pub use facet::{facet_total, FacetBucket, SearchResult};
pub use movie::{Genre, Movie, MovieId, MovieSummary, SimilarMovie};
pub use page::{HomePage, MoviePage};
