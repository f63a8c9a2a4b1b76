//! Query façade for the Cinedex movie catalog.
//!
//! Composes the catalog store and cache layer into the operations exposed to
//! callers:
//! - Faceted title search
//! - Cached top-rated, recent-release and movie-detail lookups
//! - Genre-relaxing similar-movie ranking
//! - Likes and recommendations from external collaborators
//! - Composite movie and home pages
//!
//! Every operation takes a [`QueryContext`] carrying the caller's
//! cancellation token and deadline.

pub mod collaborators;
pub mod config;
pub mod context;
pub mod error;
pub mod metrics;
pub mod search;
pub mod service;
pub mod similar;
pub mod telemetry;

pub use collaborators::{LikesDirectory, NoLikes, NoRecommendations, TasteRecommender};
pub use config::QueryConfig;
pub use context::QueryContext;
pub use error::{CollaboratorError, QueryError, QueryResult};
pub use search::FacetSearchEngine;
pub use service::MovieService;
pub use similar::{normalize_genres, SimilarityRanker};
