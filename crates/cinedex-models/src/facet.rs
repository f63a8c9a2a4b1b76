//! Search results and facet buckets.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::movie::{Genre, MovieSummary};

/// A facet discriminator value paired with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FacetBucket<K> {
    pub value: K,
    pub count: u64,
}

impl<K> FacetBucket<K> {
    pub fn new(value: K, count: u64) -> Self {
        Self { value, count }
    }
}

/// Sum the counts of a facet.
pub fn facet_total<K>(buckets: &[FacetBucket<K>]) -> u64 {
    buckets.iter().map(|b| b.count).sum()
}

/// Ranked title matches plus three facets computed over the same matched set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub search_results: Vec<MovieSummary>,
    /// Genre occurrences, count descending.
    pub genre_facet: Vec<FacetBucket<Genre>>,
    /// Release years, year ascending.
    pub release_year_facet: Vec<FacetBucket<i32>>,
    /// Vote counts, vote_count ascending.
    pub votes_facet: Vec<FacetBucket<u64>>,
}

impl SearchResult {
    pub fn len(&self) -> usize {
        self.search_results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.search_results.is_empty()
    }
}
