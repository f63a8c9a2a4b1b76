//! Shared fixtures for façade integration tests.
#![allow(dead_code)]

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use cinedex_cache::{CacheError, CacheLayer, CacheResult, MemoryCache};
use cinedex_catalog::MemoryCatalog;
use cinedex_models::{Genre, Movie, MovieId};
use cinedex_query::{MovieService, QueryConfig};

pub struct MovieBuilder(Movie);

impl MovieBuilder {
    pub fn new(id: i64, title: &str) -> Self {
        Self(Movie {
            id: MovieId::new(id).unwrap(),
            title: title.to_string(),
            genres: vec![],
            overview: String::new(),
            tagline: String::new(),
            poster_path: None,
            release_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            vote_average: 5.0,
            vote_count: 1000,
            popularity: 1.0,
        })
    }

    pub fn genres(mut self, genres: &[&str]) -> Self {
        self.0.genres = genres.iter().map(|g| Genre::new(*g).unwrap()).collect();
        self
    }

    pub fn released(mut self, y: i32, m: u32, d: u32) -> Self {
        self.0.release_date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        self
    }

    pub fn votes(mut self, count: u64, average: f64) -> Self {
        self.0.vote_count = count;
        self.0.vote_average = average;
        self
    }

    pub fn popularity(mut self, popularity: f64) -> Self {
        self.0.popularity = popularity;
        self
    }

    pub fn build(self) -> Movie {
        self.0
    }
}

pub fn godfather() -> Movie {
    MovieBuilder::new(238, "The Godfather")
        .genres(&["Drama", "Crime"])
        .released(1972, 3, 14)
        .votes(18677, 8.707)
        .popularity(120.0)
        .build()
}

pub fn shawshank() -> Movie {
    MovieBuilder::new(278, "The Shawshank Redemption")
        .genres(&["Drama", "Crime"])
        .released(1994, 9, 23)
        .votes(24649, 8.702)
        .popularity(110.0)
        .build()
}

/// Labels of `pool` selected by the bits of `mask`.
pub fn pick_genres<'a>(pool: &[&'a str], mask: usize) -> Vec<&'a str> {
    pool.iter()
        .enumerate()
        .filter(|(bit, _)| mask & (1 << bit) != 0)
        .map(|(_, g)| *g)
        .collect()
}

/// A small catalog covering every façade operation.
pub fn sample_movies() -> Vec<Movie> {
    vec![
        godfather(),
        shawshank(),
        MovieBuilder::new(335, "Once Upon a Time in the West")
            .genres(&["Drama", "Crime", "Western"])
            .released(1968, 12, 21)
            .votes(3923, 8.294)
            .build(),
        MovieBuilder::new(3090, "The Treasure of the Sierra Madre")
            .genres(&["Drama", "Western"])
            .released(1948, 1, 15)
            .votes(1066, 7.976)
            .build(),
        MovieBuilder::new(348, "Alien")
            .genres(&["Horror", "Science Fiction"])
            .released(1979, 5, 25)
            .votes(13000, 8.1)
            .popularity(90.0)
            .build(),
        MovieBuilder::new(126889, "Alien: Covenant")
            .genres(&["Science Fiction", "Horror", "Thriller"])
            .released(2017, 5, 9)
            .votes(7822, 6.1)
            .popularity(30.0)
            .build(),
        MovieBuilder::new(1151534, "Nowhere")
            .genres(&["Thriller"])
            .released(2023, 9, 29)
            .votes(195, 7.895)
            .build(),
        MovieBuilder::new(999001, "Announced Sequel")
            .genres(&["Drama"])
            .released(2999, 1, 1)
            .votes(900, 7.0)
            .build(),
    ]
}

pub fn sample_catalog() -> Arc<MemoryCatalog> {
    Arc::new(MemoryCatalog::from_movies(sample_movies()).unwrap())
}

pub fn memory_service() -> MovieService {
    MovieService::new(
        sample_catalog(),
        Arc::new(MemoryCache::new()),
        QueryConfig::default(),
    )
}

/// Drive `future` on a fresh current-thread runtime, for use inside
/// `proptest!` bodies.
pub fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

/// Cache backend whose every operation fails.
pub struct BrokenCache;

#[async_trait]
impl CacheLayer for BrokenCache {
    fn name(&self) -> &'static str {
        "broken"
    }

    async fn get(&self, _key: &str) -> CacheResult<Option<Vec<u8>>> {
        Err(CacheError::unavailable("connection refused"))
    }

    async fn set_with_ttl(&self, _key: &str, _value: Vec<u8>, _ttl: Duration) -> CacheResult<()> {
        Err(CacheError::unavailable("connection refused"))
    }
}
