//! The query façade.
//!
//! Inputs are validated before any store or cache access. Only the three
//! bounded, shared result sets are cached (top rated, recent releases and
//! per-id details); search and similarity always hit the store.

use std::sync::Arc;

use chrono::Utc;
use cinedex_cache::{CacheAside, CacheKey, CacheLayer};
use cinedex_catalog::CatalogStore;
use cinedex_models::{
    HomePage, Movie, MovieId, MoviePage, MovieSummary, SearchResult, SimilarMovie, ValidationError,
};
use tracing::debug;

use crate::collaborators::{LikesDirectory, NoLikes, NoRecommendations, TasteRecommender};
use crate::config::QueryConfig;
use crate::context::QueryContext;
use crate::error::{QueryError, QueryResult};
use crate::metrics::observe;
use crate::search::FacetSearchEngine;
use crate::similar::{normalize_genres, SimilarityRanker};

/// Validate a caller-supplied username.
fn parse_username(username: &str) -> QueryResult<&str> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyUsername.into());
    }
    Ok(trimmed)
}

/// Entry point for every catalog query.
///
/// Holds no per-call mutable state; share it behind an `Arc` across tasks.
pub struct MovieService {
    store: Arc<dyn CatalogStore>,
    cache: CacheAside,
    search: FacetSearchEngine,
    ranker: SimilarityRanker,
    likes: Arc<dyn LikesDirectory>,
    recommender: Arc<dyn TasteRecommender>,
    config: QueryConfig,
}

impl MovieService {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        cache: Arc<dyn CacheLayer>,
        config: QueryConfig,
    ) -> Self {
        Self {
            search: FacetSearchEngine::new(Arc::clone(&store)),
            ranker: SimilarityRanker::new(
                Arc::clone(&store),
                config.similar_min_votes,
                config.similar_limit,
            ),
            store,
            cache: CacheAside::new(cache),
            likes: Arc::new(NoLikes),
            recommender: Arc::new(NoRecommendations),
            config,
        }
    }

    pub fn with_likes(mut self, likes: Arc<dyn LikesDirectory>) -> Self {
        self.likes = likes;
        self
    }

    pub fn with_recommender(mut self, recommender: Arc<dyn TasteRecommender>) -> Self {
        self.recommender = recommender;
        self
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    // =========================================================================
    // Uncached operations
    // =========================================================================

    /// Ranked title matches with genre, release-year and votes facets.
    pub async fn search_movie(&self, ctx: &QueryContext, text: &str) -> QueryResult<SearchResult> {
        observe("search_movie", self.search.search(ctx, text)).await
    }

    /// Up to `similar_limit` movies sharing genres with `movie_id`.
    pub async fn get_similar_movies<S: AsRef<str>>(
        &self,
        ctx: &QueryContext,
        movie_id: i64,
        genres: &[S],
    ) -> QueryResult<Vec<SimilarMovie>> {
        observe("get_similar_movies", async {
            let id = MovieId::new(movie_id)?;
            let genres = normalize_genres(genres)?;
            ctx.check()?;
            self.ranker.find_similar(ctx, id, &genres).await
        })
        .await
    }

    /// Other users who like `movie_id`, as reported by the likes directory.
    pub async fn get_movie_likes(
        &self,
        ctx: &QueryContext,
        username: &str,
        movie_id: i64,
    ) -> QueryResult<Vec<String>> {
        observe("get_movie_likes", async {
            let username = parse_username(username)?;
            let id = MovieId::new(movie_id)?;
            self.likes_for(ctx, username, id).await
        })
        .await
    }

    /// Taste-based recommendations for `username`.
    pub async fn get_recommendations_for_me(
        &self,
        ctx: &QueryContext,
        username: &str,
    ) -> QueryResult<Vec<MovieSummary>> {
        observe("get_recommendations_for_me", async {
            let username = parse_username(username)?;
            self.recommendations_for(ctx, username).await
        })
        .await
    }

    // =========================================================================
    // Cached operations
    // =========================================================================

    /// Highest-rated movies with at least `top_rated_min_votes` votes.
    pub async fn get_top_rated_movies(&self, ctx: &QueryContext) -> QueryResult<Vec<MovieSummary>> {
        observe("get_top_rated_movies", self.top_rated(ctx)).await
    }

    /// Most recent releases before today with more than `recent_min_votes` votes.
    pub async fn get_recent_released_movies(
        &self,
        ctx: &QueryContext,
    ) -> QueryResult<Vec<MovieSummary>> {
        observe("get_recent_released_movies", self.recent(ctx)).await
    }

    /// Full record for `movie_id`, or `None` if the catalog has no such movie.
    pub async fn get_movie_details(
        &self,
        ctx: &QueryContext,
        movie_id: i64,
    ) -> QueryResult<Option<Movie>> {
        observe("get_movie_details", async {
            let id = MovieId::new(movie_id)?;
            self.details(ctx, id).await
        })
        .await
    }

    // =========================================================================
    // Composite pages
    // =========================================================================

    /// Details, similar movies and (for a signed-in user) likes of one movie.
    ///
    /// Returns `None` when the movie does not exist; nothing else is queried
    /// in that case.
    pub async fn movie_page(
        &self,
        ctx: &QueryContext,
        movie_id: i64,
        username: Option<&str>,
    ) -> QueryResult<Option<MoviePage>> {
        observe("movie_page", async {
            let id = MovieId::new(movie_id)?;
            let username = username.map(parse_username).transpose()?;

            let Some(movie) = self.details(ctx, id).await? else {
                return Ok(None);
            };

            let similar = async {
                let genres = normalize_genres(&movie.genres)?;
                self.ranker.find_similar(ctx, id, &genres).await
            };
            let likes = async {
                match username {
                    Some(user) => self.likes_for(ctx, user, id).await,
                    None => Ok(Vec::new()),
                }
            };
            let (similar, likes) = tokio::try_join!(similar, likes)?;

            Ok(Some(MoviePage {
                movie,
                similar,
                likes,
            }))
        })
        .await
    }

    /// Top rated, recent releases and (for a signed-in user) recommendations.
    pub async fn home_page(
        &self,
        ctx: &QueryContext,
        username: Option<&str>,
    ) -> QueryResult<HomePage> {
        observe("home_page", async {
            let username = username.map(parse_username).transpose()?;

            let recommendations = async {
                match username {
                    Some(user) => self.recommendations_for(ctx, user).await,
                    None => Ok(Vec::new()),
                }
            };
            let (top_rated, recent, recommendations) =
                tokio::try_join!(self.top_rated(ctx), self.recent(ctx), recommendations)?;

            Ok(HomePage {
                top_rated,
                recent,
                recommendations,
            })
        })
        .await
    }

    // =========================================================================
    // Internals (inputs already validated)
    // =========================================================================

    async fn top_rated(&self, ctx: &QueryContext) -> QueryResult<Vec<MovieSummary>> {
        ctx.check()?;
        let (min_votes, limit) = (self.config.top_rated_min_votes, self.config.top_rated_limit);

        let (key, ttl) = (CacheKey::TOP_RATED, self.config.cache_ttl);
        let compute = || async {
            let movies = self.store.find_top_rated(min_votes, limit).await?;
            Ok::<_, QueryError>(movies.iter().map(Movie::summary).collect::<Vec<_>>())
        };
        ctx.run(self.cache.get_or_compute(key, ttl, compute)).await
    }

    async fn recent(&self, ctx: &QueryContext) -> QueryResult<Vec<MovieSummary>> {
        ctx.check()?;
        let (min_votes, limit) = (self.config.recent_min_votes, self.config.recent_limit);

        let (key, ttl) = (CacheKey::RECENT_RELEASED, self.config.cache_ttl);
        let compute = || async {
            let today = Utc::now().date_naive();
            let movies = self.store.find_recent(today, min_votes, limit).await?;
            Ok::<_, QueryError>(movies.iter().map(Movie::summary).collect::<Vec<_>>())
        };
        ctx.run(self.cache.get_or_compute(key, ttl, compute)).await
    }

    async fn details(&self, ctx: &QueryContext, id: MovieId) -> QueryResult<Option<Movie>> {
        ctx.check()?;
        let (key, ttl) = (CacheKey::movie_detail(id), self.config.cache_ttl);
        let compute = || async {
            let movie = self.store.find_by_id(id).await?;
            Ok::<_, QueryError>(movie)
        };

        let movie = ctx
            .run(self.cache.get_or_compute_some(&key, ttl, compute))
            .await?;

        if movie.is_none() {
            debug!(movie_id = %id, "Movie not found");
        }
        Ok(movie)
    }

    async fn likes_for(
        &self,
        ctx: &QueryContext,
        username: &str,
        id: MovieId,
    ) -> QueryResult<Vec<String>> {
        ctx.check()?;
        let likes = ctx
            .run(async {
                let likes = self.likes.likes_for(username, id).await?;
                Ok(likes)
            })
            .await?;
        Ok(likes)
    }

    async fn recommendations_for(
        &self,
        ctx: &QueryContext,
        username: &str,
    ) -> QueryResult<Vec<MovieSummary>> {
        ctx.check()?;
        let limit = self.config.recommendations_limit;

        let mut movies = ctx
            .run(async {
                let movies = self.recommender.recommend_for(username, limit).await?;
                Ok(movies)
            })
            .await?;
        movies.truncate(limit);
        Ok(movies)
    }
}
