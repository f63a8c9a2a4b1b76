//! Catalog store trait definition.

use async_trait::async_trait;
use chrono::NaiveDate;

use cinedex_models::{FacetBucket, Genre, Movie, MovieId};

use crate::error::CatalogResult;
use crate::filter::{GenreSetFilter, TitleFilter};

/// Read-only, filtered, sorted and limited access to movie records.
///
/// Implementations are injected into the query façade, so the persistent
/// backend can be swapped for an in-memory snapshot or a test double.
/// A missing document is `Ok(None)`; `Err` always means the store could not
/// answer and is fatal for the current request.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Backend name for logs and metrics.
    fn name(&self) -> &'static str;

    /// All movies whose title matches `filter`, ranked by popularity desc,
    /// then vote_count desc, then vote_average desc.
    async fn find_by_title_match(&self, filter: &TitleFilter) -> CatalogResult<Vec<Movie>>;

    /// Genre occurrences over the `filter` match set, count descending.
    async fn facet_by_genre(
        &self,
        filter: &TitleFilter,
    ) -> CatalogResult<Vec<FacetBucket<Genre>>>;

    /// Release years over the `filter` match set, year ascending.
    async fn facet_by_release_year(
        &self,
        filter: &TitleFilter,
    ) -> CatalogResult<Vec<FacetBucket<i32>>>;

    /// Vote counts over the `filter` match set, vote_count ascending.
    async fn facet_by_vote_count(
        &self,
        filter: &TitleFilter,
    ) -> CatalogResult<Vec<FacetBucket<u64>>>;

    /// Movies with `vote_count >= min_votes`, vote_average desc.
    async fn find_top_rated(&self, min_votes: u64, limit: usize) -> CatalogResult<Vec<Movie>>;

    /// Movies released strictly before `before` with `vote_count > min_votes`,
    /// release date desc.
    async fn find_recent(
        &self,
        before: NaiveDate,
        min_votes: u64,
        limit: usize,
    ) -> CatalogResult<Vec<Movie>>;

    async fn find_by_id(&self, id: MovieId) -> CatalogResult<Option<Movie>>;

    /// Movies carrying every genre of the filter, vote_average desc.
    async fn find_by_genre_set(&self, filter: &GenreSetFilter) -> CatalogResult<Vec<Movie>>;
}
