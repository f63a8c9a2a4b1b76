//! Genre-relaxing similarity ranking.
//!
//! Round `r` requires the first `n - r` requested genres, so the last genre
//! is the first one relaxed. Rounds stop once the budget is full or no genre
//! is left. The caller's genre list is never modified.

use std::collections::HashSet;
use std::sync::Arc;

use cinedex_catalog::{CatalogStore, GenreSetFilter};
use cinedex_models::{Genre, ModelResult, Movie, MovieId, SimilarMovie};
use tracing::debug;

use crate::context::QueryContext;
use crate::error::QueryResult;

/// Parse genre labels, dropping repeats while keeping first-seen order.
pub fn normalize_genres<S: AsRef<str>>(labels: &[S]) -> ModelResult<Vec<Genre>> {
    let mut seen = HashSet::with_capacity(labels.len());
    let mut genres = Vec::with_capacity(labels.len());
    for label in labels {
        let genre = Genre::new(label.as_ref())?;
        if seen.insert(genre.clone()) {
            genres.push(genre);
        }
    }
    Ok(genres)
}

#[derive(Clone)]
pub struct SimilarityRanker {
    store: Arc<dyn CatalogStore>,
    min_votes: u64,
    limit: usize,
}

impl SimilarityRanker {
    pub fn new(store: Arc<dyn CatalogStore>, min_votes: u64, limit: usize) -> Self {
        Self {
            store,
            min_votes,
            limit,
        }
    }

    /// Movies sharing genres with `genres`, excluding `movie_id` itself.
    ///
    /// Output is ordered by matched genre count, then rating, both descending,
    /// and holds at most `limit` distinct movies.
    pub async fn find_similar(
        &self,
        ctx: &QueryContext,
        movie_id: MovieId,
        genres: &[Genre],
    ) -> QueryResult<Vec<SimilarMovie>> {
        let mut accumulated: Vec<Movie> = Vec::with_capacity(self.limit);
        let mut seen: HashSet<MovieId> = HashSet::with_capacity(self.limit);
        let mut working = genres.len();
        let mut rounds = 0usize;

        while accumulated.len() < self.limit && working > 0 {
            // Hits from stricter rounds come back in relaxed ones, so every
            // round asks for the full budget and duplicates are skipped here.
            let filter = GenreSetFilter::new(&genres[..working], self.min_votes, self.limit)
                .excluding(movie_id);

            let round = ctx
                .run(async {
                    let round = self.store.find_by_genre_set(&filter).await?;
                    Ok(round)
                })
                .await?;

            for movie in round {
                if accumulated.len() == self.limit {
                    break;
                }
                if seen.insert(movie.id) {
                    accumulated.push(movie);
                }
            }

            working -= 1;
            rounds += 1;
        }

        let mut similar: Vec<SimilarMovie> = accumulated
            .iter()
            .map(|movie| SimilarMovie::new(movie, genres))
            .collect();

        // Stable: equal keys keep round order.
        similar.sort_by(|a, b| {
            b.matched_genres
                .cmp(&a.matched_genres)
                .then_with(|| b.movie.vote_average.total_cmp(&a.movie.vote_average))
        });

        debug!(
            movie_id = %movie_id,
            genres = genres.len(),
            rounds = rounds,
            found = similar.len(),
            "Similarity ranking finished"
        );

        Ok(similar)
    }
}
