//! Integration tests for the in-memory catalog.

use std::io::Write;

use chrono::NaiveDate;
use cinedex_catalog::{CatalogError, CatalogStore, GenreSetFilter, MemoryCatalog, TitleFilter};
use cinedex_models::{facet_total, Genre, Movie, MovieId};

// =============================================================================
// Test Helpers
// =============================================================================

struct MovieBuilder(Movie);

impl MovieBuilder {
    fn new(id: i64, title: &str) -> Self {
        Self(Movie {
            id: MovieId::new(id).unwrap(),
            title: title.to_string(),
            genres: vec![],
            overview: String::new(),
            tagline: String::new(),
            poster_path: None,
            release_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            vote_average: 5.0,
            vote_count: 100,
            popularity: 1.0,
        })
    }

    fn genres(mut self, genres: &[&str]) -> Self {
        self.0.genres = genres.iter().map(|g| Genre::new(*g).unwrap()).collect();
        self
    }

    fn released(mut self, y: i32, m: u32, d: u32) -> Self {
        self.0.release_date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        self
    }

    fn votes(mut self, count: u64, average: f64) -> Self {
        self.0.vote_count = count;
        self.0.vote_average = average;
        self
    }

    fn popularity(mut self, popularity: f64) -> Self {
        self.0.popularity = popularity;
        self
    }

    fn build(self) -> Movie {
        self.0
    }
}

fn alien_catalog() -> MemoryCatalog {
    MemoryCatalog::from_movies(vec![
        MovieBuilder::new(981314, "Alien Invasion")
            .genres(&["Science Fiction", "Horror"])
            .released(2023, 5, 11)
            .votes(48, 5.542)
            .popularity(30.0)
            .build(),
        MovieBuilder::new(126889, "Alien: Covenant")
            .genres(&["Science Fiction", "Horror", "Thriller"])
            .released(2017, 5, 9)
            .votes(7822, 6.1)
            .popularity(30.0)
            .build(),
        MovieBuilder::new(348, "ALIEN")
            .genres(&["Horror", "Science Fiction"])
            .released(1979, 5, 25)
            .votes(13000, 8.1)
            .popularity(90.0)
            .build(),
        MovieBuilder::new(238, "The Godfather")
            .genres(&["Drama", "Crime"])
            .released(1972, 3, 14)
            .votes(18677, 8.707)
            .popularity(120.0)
            .build(),
    ])
    .unwrap()
}

// =============================================================================
// Title Search & Facets
// =============================================================================

#[tokio::test]
async fn test_title_match_ranking() {
    let catalog = alien_catalog();
    let filter = TitleFilter::new("alien");

    let found = catalog.find_by_title_match(&filter).await.unwrap();
    let ids: Vec<i64> = found.iter().map(|m| m.id.get()).collect();

    // Popularity first; the two 30.0 entries are separated by vote_count.
    assert_eq!(ids, vec![348, 126889, 981314]);
    for movie in &found {
        assert!(movie.title.to_lowercase().contains("alien"));
    }
}

#[tokio::test]
async fn test_title_match_no_results() {
    let catalog = alien_catalog();
    let filter = TitleFilter::new("zzz");

    let found = catalog.find_by_title_match(&filter).await.unwrap();
    let genre_facet = catalog.facet_by_genre(&filter).await.unwrap();
    let year_facet = catalog.facet_by_release_year(&filter).await.unwrap();
    let votes_facet = catalog.facet_by_vote_count(&filter).await.unwrap();

    assert!(found.is_empty());
    assert!(genre_facet.is_empty());
    assert!(year_facet.is_empty());
    assert!(votes_facet.is_empty());
}

#[tokio::test]
async fn test_facets_cover_exactly_the_match_set() {
    let catalog = alien_catalog();
    let filter = TitleFilter::new("Alien");

    let found = catalog.find_by_title_match(&filter).await.unwrap();
    let genre_facet = catalog.facet_by_genre(&filter).await.unwrap();
    let year_facet = catalog.facet_by_release_year(&filter).await.unwrap();
    let votes_facet = catalog.facet_by_vote_count(&filter).await.unwrap();

    let genre_occurrences: usize = found.iter().map(|m| m.genres.len()).sum();
    assert_eq!(facet_total(&genre_facet), genre_occurrences as u64);
    assert_eq!(facet_total(&year_facet), found.len() as u64);
    assert_eq!(facet_total(&votes_facet), found.len() as u64);

    // Drama/Crime only appear on a non-matching title.
    assert!(genre_facet.iter().all(|b| b.value.as_str() != "Drama"));
}

#[tokio::test]
async fn test_facet_orderings() {
    let catalog = alien_catalog();
    let filter = TitleFilter::new("alien");

    let genre_facet = catalog.facet_by_genre(&filter).await.unwrap();
    let labels: Vec<(&str, u64)> = genre_facet
        .iter()
        .map(|bucket| (bucket.value.as_str(), bucket.count))
        .collect();
    assert_eq!(
        labels,
        vec![("Horror", 3), ("Science Fiction", 3), ("Thriller", 1)]
    );

    let years: Vec<i32> = catalog
        .facet_by_release_year(&filter)
        .await
        .unwrap()
        .iter()
        .map(|b| b.value)
        .collect();
    assert_eq!(years, vec![1979, 2017, 2023]);

    let votes: Vec<u64> = catalog
        .facet_by_vote_count(&filter)
        .await
        .unwrap()
        .iter()
        .map(|b| b.value)
        .collect();
    assert_eq!(votes, vec![48, 7822, 13000]);
}

// =============================================================================
// Reference Lists
// =============================================================================

#[tokio::test]
async fn test_top_rated_scenario() {
    let catalog = MemoryCatalog::from_movies(vec![
        MovieBuilder::new(278, "The Shawshank Redemption")
            .votes(24649, 8.702)
            .build(),
        MovieBuilder::new(238, "The Godfather")
            .votes(18677, 8.707)
            .build(),
        MovieBuilder::new(1, "Obscure Gem").votes(4999, 9.9).build(),
    ])
    .unwrap();

    let top = catalog.find_top_rated(5000, 25).await.unwrap();
    let ids: Vec<i64> = top.iter().map(|m| m.id.get()).collect();
    assert_eq!(ids, vec![238, 278]);
}

#[tokio::test]
async fn test_top_rated_threshold_is_inclusive_and_limited() {
    let catalog = MemoryCatalog::from_movies(vec![
        MovieBuilder::new(1, "A").votes(5000, 7.0).build(),
        MovieBuilder::new(2, "B").votes(6000, 8.0).build(),
        MovieBuilder::new(3, "C").votes(7000, 9.0).build(),
    ])
    .unwrap();

    let top = catalog.find_top_rated(5000, 2).await.unwrap();
    let ids: Vec<i64> = top.iter().map(|m| m.id.get()).collect();
    assert_eq!(ids, vec![3, 2]);

    let all = catalog.find_top_rated(5000, 25).await.unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn test_recent_filters_and_orders() {
    let catalog = MemoryCatalog::from_movies(vec![
        MovieBuilder::new(1151534, "Nowhere")
            .released(2023, 9, 29)
            .votes(195, 7.895)
            .build(),
        MovieBuilder::new(866463, "Reptile")
            .released(2023, 9, 28)
            .votes(65, 7.354)
            .build(),
        MovieBuilder::new(3, "Too Few Votes")
            .released(2023, 9, 30)
            .votes(50, 6.0)
            .build(),
        MovieBuilder::new(4, "Unreleased")
            .released(2023, 10, 1)
            .votes(900, 6.0)
            .build(),
    ])
    .unwrap();

    let before = NaiveDate::from_ymd_opt(2023, 10, 1).unwrap();
    let recent = catalog.find_recent(before, 50, 50).await.unwrap();
    let ids: Vec<i64> = recent.iter().map(|m| m.id.get()).collect();
    assert_eq!(ids, vec![1151534, 866463]);
}

#[tokio::test]
async fn test_genre_set_exclusion_and_limit() {
    let catalog = MemoryCatalog::from_movies(vec![
        MovieBuilder::new(238, "The Godfather")
            .genres(&["Drama", "Crime"])
            .votes(18677, 8.707)
            .build(),
        MovieBuilder::new(240, "The Godfather Part II")
            .genres(&["Drama", "Crime"])
            .votes(11000, 8.6)
            .build(),
        MovieBuilder::new(335, "Once Upon a Time in the West")
            .genres(&["Drama", "Crime", "Western"])
            .votes(3923, 8.294)
            .build(),
    ])
    .unwrap();

    let genres = [Genre::new("Crime").unwrap()];
    let filter = GenreSetFilter::new(&genres, 500, 1).excluding(MovieId::new(238).unwrap());

    let found = catalog.find_by_genre_set(&filter).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id.get(), 240);
}

// =============================================================================
// Snapshot Loading
// =============================================================================

#[tokio::test]
async fn test_load_json_snapshot() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"_id": 238, "title": "The Godfather", "genres": ["Drama", "Crime"],
              "release_date": "1972-03-14", "vote_average": 8.707, "vote_count": 18677,
              "popularity": 120.0, "tagline": "An offer you can't refuse."}},
            {{"id": 278, "title": "The Shawshank Redemption", "genres": ["Drama", "Crime"],
              "release_date": "1994-09-23", "vote_average": 8.702, "vote_count": 24649}}
        ]"#
    )
    .unwrap();

    let catalog = MemoryCatalog::load_json(file.path()).await.unwrap();
    assert_eq!(catalog.len(), 2);

    let godfather = catalog
        .find_by_id(MovieId::new(238).unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(godfather.tagline, "An offer you can't refuse.");
}

#[tokio::test]
async fn test_load_json_snapshot_errors() {
    let missing = MemoryCatalog::load_json("/nonexistent/movies.json").await;
    assert!(matches!(missing, Err(CatalogError::Snapshot(_))));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();
    let garbage = MemoryCatalog::load_json(file.path()).await;
    assert!(matches!(garbage, Err(CatalogError::Snapshot(_))));
}
