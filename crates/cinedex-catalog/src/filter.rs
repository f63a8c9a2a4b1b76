//! Filter predicates shared by catalog queries.
//!
//! The title search and its three facets are all driven by the same
//! `TitleFilter`, so a facet can never count documents the result list
//! does not contain.

use cinedex_models::{Genre, Movie, MovieId};

/// Case-insensitive substring match on the movie title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleFilter {
    text: String,
    needle: String,
}

impl TitleFilter {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let needle = text.to_lowercase();
        Self { text, needle }
    }

    /// The text as supplied by the caller.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lower-cased search needle.
    pub fn needle(&self) -> &str {
        &self.needle
    }

    pub fn matches(&self, movie: &Movie) -> bool {
        self.matches_title(&movie.title)
    }

    pub fn matches_title(&self, title: &str) -> bool {
        title.to_lowercase().contains(&self.needle)
    }

    /// Match against a title that was already lower-cased.
    pub fn matches_lowered(&self, lowered_title: &str) -> bool {
        lowered_title.contains(&self.needle)
    }
}

/// Contains-all genre query used by similarity ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreSetFilter {
    /// Every one of these genres must be present on a match.
    pub genres: Vec<Genre>,
    pub exclude_id: Option<MovieId>,
    /// Matches need strictly more votes than this.
    pub min_votes: u64,
    pub limit: usize,
}

impl GenreSetFilter {
    pub fn new(genres: &[Genre], min_votes: u64, limit: usize) -> Self {
        Self {
            genres: genres.to_vec(),
            exclude_id: None,
            min_votes,
            limit,
        }
    }

    pub fn excluding(mut self, id: MovieId) -> Self {
        self.exclude_id = Some(id);
        self
    }

    pub fn matches(&self, movie: &Movie) -> bool {
        movie.vote_count > self.min_votes
            && self.exclude_id != Some(movie.id)
            && movie.has_all_genres(&self.genres)
    }
}
