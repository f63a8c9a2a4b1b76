//! External providers for likes and taste-based recommendations.
//!
//! Both live outside the catalog (typically a social graph); the façade only
//! validates the username and forwards the call.

use async_trait::async_trait;
use cinedex_models::{MovieId, MovieSummary};

use crate::error::CollaboratorError;

/// Who else likes a movie.
#[async_trait]
pub trait LikesDirectory: Send + Sync {
    /// Usernames of other users who like `movie_id`.
    async fn likes_for(
        &self,
        username: &str,
        movie_id: MovieId,
    ) -> Result<Vec<String>, CollaboratorError>;
}

/// Recommendations derived from users with similar taste.
#[async_trait]
pub trait TasteRecommender: Send + Sync {
    async fn recommend_for(
        &self,
        username: &str,
        limit: usize,
    ) -> Result<Vec<MovieSummary>, CollaboratorError>;
}

/// Directory with no likes recorded.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLikes;

#[async_trait]
impl LikesDirectory for NoLikes {
    async fn likes_for(
        &self,
        _username: &str,
        _movie_id: MovieId,
    ) -> Result<Vec<String>, CollaboratorError> {
        Ok(Vec::new())
    }
}

/// Recommender that never recommends anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRecommendations;

#[async_trait]
impl TasteRecommender for NoRecommendations {
    async fn recommend_for(
        &self,
        _username: &str,
        _limit: usize,
    ) -> Result<Vec<MovieSummary>, CollaboratorError> {
        Ok(Vec::new())
    }
}
