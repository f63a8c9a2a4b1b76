//! Composite views assembled from several façade operations.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::movie::{Movie, MovieSummary, SimilarMovie};

/// Everything shown for a single movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MoviePage {
    pub movie: Movie,
    pub similar: Vec<SimilarMovie>,
    /// Other users who like this movie; empty for anonymous callers.
    pub likes: Vec<String>,
}

/// Landing view: shared reference lists plus per-user recommendations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HomePage {
    pub top_rated: Vec<MovieSummary>,
    pub recent: Vec<MovieSummary>,
    pub recommendations: Vec<MovieSummary>,
}
