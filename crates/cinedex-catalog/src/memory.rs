//! Indexed in-memory catalog snapshot.
//!
//! Holds the whole movie collection with:
//! - An id index for detail lookups
//! - Per-genre posting lists for contains-all genre queries
//! - Precomputed rating and release-date orderings for the reference lists
//!
//! The snapshot is immutable once built, so it can be shared across any
//! number of concurrent callers without locking.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::info;

use cinedex_models::{FacetBucket, Genre, Movie, MovieId};

use crate::error::{CatalogError, CatalogResult};
use crate::filter::{GenreSetFilter, TitleFilter};
use crate::metrics::observe;
use crate::store::CatalogStore;

const BACKEND: &str = "memory";

/// In-memory catalog built from validated movie records.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    /// Records in snapshot order.
    movies: Vec<Movie>,
    /// Lower-cased titles, parallel to `movies`.
    lowered_titles: Vec<String>,
    by_id: HashMap<MovieId, usize>,
    by_genre: HashMap<Genre, Vec<usize>>,
    /// Positions sorted by vote_average desc.
    by_rating: Vec<usize>,
    /// Rank of each position within `by_rating`.
    rating_rank: Vec<usize>,
    /// Positions sorted by release_date desc.
    by_release: Vec<usize>,
}

impl MemoryCatalog {
    /// Build a catalog, validating every record and rejecting duplicate ids.
    pub fn from_movies(movies: Vec<Movie>) -> CatalogResult<Self> {
        let mut by_id = HashMap::with_capacity(movies.len());
        let mut by_genre: HashMap<Genre, Vec<usize>> = HashMap::new();
        let mut lowered_titles = Vec::with_capacity(movies.len());

        for (pos, movie) in movies.iter().enumerate() {
            movie.validate()?;

            if by_id.insert(movie.id, pos).is_some() {
                return Err(CatalogError::DuplicateId(movie.id));
            }

            for genre in &movie.genres {
                by_genre.entry(genre.clone()).or_default().push(pos);
            }

            lowered_titles.push(movie.title.to_lowercase());
        }

        let mut by_rating: Vec<usize> = (0..movies.len()).collect();
        by_rating.sort_by(|&a, &b| movies[b].vote_average.total_cmp(&movies[a].vote_average));

        let mut rating_rank = vec![0; movies.len()];
        for (rank, &pos) in by_rating.iter().enumerate() {
            rating_rank[pos] = rank;
        }

        let mut by_release: Vec<usize> = (0..movies.len()).collect();
        by_release.sort_by(|&a, &b| movies[b].release_date.cmp(&movies[a].release_date));

        Ok(Self {
            movies,
            lowered_titles,
            by_id,
            by_genre,
            by_rating,
            rating_rank,
            by_release,
        })
    }

    /// Load a JSON array snapshot of movie records.
    pub async fn load_json(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            CatalogError::snapshot(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let movies: Vec<Movie> = serde_json::from_slice(&bytes).map_err(|e| {
            CatalogError::snapshot(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        let catalog = Self::from_movies(movies)?;
        info!(
            path = %path.display(),
            movies = catalog.len(),
            genres = catalog.by_genre.len(),
            "Loaded catalog snapshot"
        );
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Positions matching the title filter, in snapshot order.
    fn title_matches<'a>(&'a self, filter: &'a TitleFilter) -> impl Iterator<Item = usize> + 'a {
        self.lowered_titles
            .iter()
            .enumerate()
            .filter(move |(_, title)| filter.matches_lowered(title))
            .map(|(pos, _)| pos)
    }

    fn collect(&self, positions: impl Iterator<Item = usize>) -> Vec<Movie> {
        positions.map(|pos| self.movies[pos].clone()).collect()
    }
}

/// popularity desc, vote_count desc, vote_average desc.
fn search_rank(a: &Movie, b: &Movie) -> Ordering {
    b.popularity
        .total_cmp(&a.popularity)
        .then_with(|| b.vote_count.cmp(&a.vote_count))
        .then_with(|| b.vote_average.total_cmp(&a.vote_average))
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    fn name(&self) -> &'static str {
        BACKEND
    }

    async fn find_by_title_match(&self, filter: &TitleFilter) -> CatalogResult<Vec<Movie>> {
        observe(BACKEND, "find_by_title_match", async {
            let mut matches: Vec<&Movie> = self
                .title_matches(filter)
                .map(|pos| &self.movies[pos])
                .collect();
            // Stable: equal keys keep snapshot order.
            matches.sort_by(|a, b| search_rank(a, b));
            Ok(matches.into_iter().cloned().collect())
        })
        .await
    }

    async fn facet_by_genre(
        &self,
        filter: &TitleFilter,
    ) -> CatalogResult<Vec<FacetBucket<Genre>>> {
        observe(BACKEND, "facet_by_genre", async {
            let mut counts: HashMap<&Genre, u64> = HashMap::new();
            for pos in self.title_matches(filter) {
                for genre in &self.movies[pos].genres {
                    *counts.entry(genre).or_insert(0) += 1;
                }
            }

            let mut buckets: Vec<FacetBucket<Genre>> = counts
                .into_iter()
                .map(|(genre, count)| FacetBucket::new(genre.clone(), count))
                .collect();
            buckets.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
            Ok(buckets)
        })
        .await
    }

    async fn facet_by_release_year(
        &self,
        filter: &TitleFilter,
    ) -> CatalogResult<Vec<FacetBucket<i32>>> {
        observe(BACKEND, "facet_by_release_year", async {
            let mut counts: BTreeMap<i32, u64> = BTreeMap::new();
            for pos in self.title_matches(filter) {
                *counts.entry(self.movies[pos].release_year()).or_insert(0) += 1;
            }
            Ok(counts
                .into_iter()
                .map(|(year, count)| FacetBucket::new(year, count))
                .collect())
        })
        .await
    }

    async fn facet_by_vote_count(
        &self,
        filter: &TitleFilter,
    ) -> CatalogResult<Vec<FacetBucket<u64>>> {
        observe(BACKEND, "facet_by_vote_count", async {
            let mut counts: BTreeMap<u64, u64> = BTreeMap::new();
            for pos in self.title_matches(filter) {
                *counts.entry(self.movies[pos].vote_count).or_insert(0) += 1;
            }
            Ok(counts
                .into_iter()
                .map(|(votes, count)| FacetBucket::new(votes, count))
                .collect())
        })
        .await
    }

    async fn find_top_rated(&self, min_votes: u64, limit: usize) -> CatalogResult<Vec<Movie>> {
        observe(BACKEND, "find_top_rated", async {
            let positions = self
                .by_rating
                .iter()
                .copied()
                .filter(|&pos| self.movies[pos].vote_count >= min_votes)
                .take(limit);
            Ok(self.collect(positions))
        })
        .await
    }

    async fn find_recent(
        &self,
        before: NaiveDate,
        min_votes: u64,
        limit: usize,
    ) -> CatalogResult<Vec<Movie>> {
        observe(BACKEND, "find_recent", async {
            let positions = self
                .by_release
                .iter()
                .copied()
                .filter(|&pos| {
                    let movie = &self.movies[pos];
                    movie.release_date < before && movie.vote_count > min_votes
                })
                .take(limit);
            Ok(self.collect(positions))
        })
        .await
    }

    async fn find_by_id(&self, id: MovieId) -> CatalogResult<Option<Movie>> {
        observe(BACKEND, "find_by_id", async {
            Ok(self.by_id.get(&id).map(|&pos| self.movies[pos].clone()))
        })
        .await
    }

    async fn find_by_genre_set(&self, filter: &GenreSetFilter) -> CatalogResult<Vec<Movie>> {
        observe(BACKEND, "find_by_genre_set", async {
            if filter.limit == 0 {
                return Ok(Vec::new());
            }

            // Drive the scan from the shortest posting list.
            let mut candidates: Vec<usize> = if filter.genres.is_empty() {
                (0..self.movies.len()).collect()
            } else {
                let shortest = filter
                    .genres
                    .iter()
                    .map(|g| self.by_genre.get(g).map(Vec::as_slice).unwrap_or(&[]))
                    .min_by_key(|postings| postings.len())
                    .unwrap_or(&[]);
                shortest.to_vec()
            };

            candidates.retain(|&pos| filter.matches(&self.movies[pos]));
            candidates.sort_by_key(|&pos| self.rating_rank[pos]);
            candidates.truncate(filter.limit);

            Ok(self.collect(candidates.into_iter()))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i64, title: &str, genres: &[&str], votes: u64, rating: f64) -> Movie {
        Movie {
            id: MovieId::new(id).unwrap(),
            title: title.to_string(),
            genres: genres.iter().map(|g| Genre::new(*g).unwrap()).collect(),
            overview: String::new(),
            tagline: String::new(),
            poster_path: None,
            release_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            vote_average: rating,
            vote_count: votes,
            popularity: 1.0,
        }
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = MemoryCatalog::from_movies(vec![
            movie(1, "One", &["Drama"], 10, 5.0),
            movie(1, "Uno", &["Drama"], 10, 5.0),
        ]);
        match result {
            Err(CatalogError::DuplicateId(id)) => assert_eq!(id.get(), 1),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("duplicate ids accepted"),
        }
    }

    #[test]
    fn test_rejects_invalid_records() {
        let result = MemoryCatalog::from_movies(vec![movie(2, "Bad", &["Drama"], 10, 12.0)]);
        assert!(matches!(result, Err(CatalogError::InvalidRecord(_))));
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let movies = vec![movie(238, "The Godfather", &["Drama"], 10, 8.7)];
        let catalog = MemoryCatalog::from_movies(movies).unwrap();

        let godfather = MovieId::new(238).unwrap();
        let found = catalog.find_by_id(godfather).await.unwrap();
        assert_eq!(found.unwrap().title, "The Godfather");

        let unknown = MovieId::new(999).unwrap();
        let missing = catalog.find_by_id(unknown).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_genre_set_uses_all_genres_and_rating_order() {
        let catalog = MemoryCatalog::from_movies(vec![
            movie(1, "A", &["Drama", "Crime"], 1000, 7.0),
            movie(2, "B", &["Drama", "Crime", "Thriller"], 1000, 8.0),
            movie(3, "C", &["Drama"], 1000, 9.0),
            movie(4, "D", &["Crime", "Drama"], 100, 9.5),
        ])
        .unwrap();

        let genres = [Genre::new("Drama").unwrap(), Genre::new("Crime").unwrap()];
        let found = catalog
            .find_by_genre_set(&GenreSetFilter::new(&genres, 500, 10))
            .await
            .unwrap();

        let ids: Vec<i64> = found.iter().map(|m| m.id.get()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_genre_set_unknown_genre_is_empty() {
        let movies = vec![movie(1, "A", &["Drama"], 1000, 7.0)];
        let catalog = MemoryCatalog::from_movies(movies).unwrap();
        let genres = [
            Genre::new("Drama").unwrap(),
            Genre::new("Western").unwrap(),
        ];

        let found = catalog
            .find_by_genre_set(&GenreSetFilter::new(&genres, 0, 10))
            .await
            .unwrap();
        assert!(found.is_empty());
    }
}
