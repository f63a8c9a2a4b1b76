//! Movie records and list projections.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ModelResult, ValidationError};

/// Unique identifier of a movie in the catalog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct MovieId(i64);

impl MovieId {
    /// Create a movie id, rejecting non-positive values.
    pub fn new(raw: i64) -> ModelResult<Self> {
        if raw <= 0 {
            return Err(ValidationError::InvalidMovieId(raw));
        }
        Ok(Self(raw))
    }

    /// Get the raw integer value.
    pub const fn get(self) -> i64 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MovieId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: i64 = s
            .trim()
            .parse()
            .map_err(|_| ValidationError::MalformedMovieId(s.to_string()))?;
        Self::new(raw)
    }
}

impl TryFrom<i64> for MovieId {
    type Error = ValidationError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

/// A genre label such as "Drama" or "Science Fiction".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Genre(String);

impl Genre {
    /// Create a genre from a label, trimming surrounding whitespace.
    pub fn new(label: impl Into<String>) -> ModelResult<Self> {
        let label = label.into();
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyGenre);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Genre {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Genre {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for Genre {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// A movie record as held by the catalog.
///
/// Records are produced by an external ingestion process and are read-only
/// here. The id field also accepts the `_id` spelling used by document stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Movie {
    #[serde(alias = "_id")]
    pub id: MovieId,

    pub title: String,

    #[serde(default)]
    pub genres: Vec<Genre>,

    #[serde(default)]
    pub overview: String,

    #[serde(default)]
    pub tagline: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,

    pub release_date: NaiveDate,

    /// Average rating on a 0-10 scale.
    pub vote_average: f64,

    pub vote_count: u64,

    #[serde(default)]
    pub popularity: f64,
}

impl Movie {
    /// Check field presence and ranges.
    pub fn validate(&self) -> ModelResult<()> {
        let id = self.id.get();

        if !self.id.is_valid() {
            return Err(ValidationError::InvalidMovieId(id));
        }

        if self.title.trim().is_empty() {
            return Err(ValidationError::invalid_record(id, "title is empty"));
        }

        if !(0.0..=10.0).contains(&self.vote_average) {
            return Err(ValidationError::invalid_record(
                id,
                format!("vote_average {} outside 0-10", self.vote_average),
            ));
        }

        if !self.popularity.is_finite() || self.popularity < 0.0 {
            return Err(ValidationError::invalid_record(
                id,
                format!("popularity {} is negative or not finite", self.popularity),
            ));
        }

        let mut seen = HashSet::with_capacity(self.genres.len());
        for genre in &self.genres {
            if genre.as_str().trim().is_empty() {
                return Err(ValidationError::invalid_record(id, "empty genre label"));
            }
            if !seen.insert(genre.as_str()) {
                return Err(ValidationError::invalid_record(
                    id,
                    format!("genre {} listed twice", genre),
                ));
            }
        }

        Ok(())
    }

    pub fn release_year(&self) -> i32 {
        self.release_date.year()
    }

    pub fn has_genre(&self, genre: &Genre) -> bool {
        self.genres.iter().any(|g| g == genre)
    }

    /// True if the movie carries every genre in `required`.
    pub fn has_all_genres(&self, required: &[Genre]) -> bool {
        required.iter().all(|g| self.has_genre(g))
    }

    /// Number of genres in `requested` that this movie carries.
    pub fn matched_genres(&self, requested: &[Genre]) -> usize {
        requested.iter().filter(|g| self.has_genre(g)).count()
    }

    /// Project to the list representation.
    pub fn summary(&self) -> MovieSummary {
        MovieSummary {
            id: self.id,
            title: self.title.clone(),
            poster_path: self.poster_path.clone(),
            release_date: self.release_date,
            vote_average: self.vote_average,
            vote_count: self.vote_count,
        }
    }
}

/// List projection of a movie (search results, top rated, recent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MovieSummary {
    #[serde(alias = "_id")]
    pub id: MovieId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    pub release_date: NaiveDate,
    pub vote_average: f64,
    pub vote_count: u64,
}

impl From<&Movie> for MovieSummary {
    fn from(movie: &Movie) -> Self {
        movie.summary()
    }
}

/// A similar-movie recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SimilarMovie {
    #[serde(flatten)]
    pub movie: MovieSummary,

    /// How many of the requested genres this movie carries.
    pub matched_genres: usize,
}

impl SimilarMovie {
    pub fn new(movie: &Movie, requested: &[Genre]) -> Self {
        Self {
            movie: movie.summary(),
            matched_genres: movie.matched_genres(requested),
        }
    }

    pub fn id(&self) -> MovieId {
        self.movie.id
    }
}
