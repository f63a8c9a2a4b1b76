//! Faceted title search.

use std::sync::Arc;

use cinedex_catalog::{CatalogStore, TitleFilter};
use cinedex_models::{Movie, SearchResult, ValidationError};
use tracing::debug;

use crate::context::QueryContext;
use crate::error::{QueryError, QueryResult};

/// Runs a title search and its three facets against one filter.
///
/// The match list and every facet are built from the same [`TitleFilter`], so
/// the facets always describe exactly the returned matches. Results are not
/// paginated.
#[derive(Clone)]
pub struct FacetSearchEngine {
    store: Arc<dyn CatalogStore>,
}

impl FacetSearchEngine {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn search(&self, ctx: &QueryContext, text: &str) -> QueryResult<SearchResult> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyQuery.into());
        }
        ctx.check()?;

        let filter = TitleFilter::new(text);
        let store = self.store.as_ref();

        let (matches, genre_facet, release_year_facet, votes_facet) = ctx
            .run(async {
                tokio::try_join!(
                    store.find_by_title_match(&filter),
                    store.facet_by_genre(&filter),
                    store.facet_by_release_year(&filter),
                    store.facet_by_vote_count(&filter),
                )
                .map_err(QueryError::from)
            })
            .await?;

        debug!(
            query = text,
            matches = matches.len(),
            genres = genre_facet.len(),
            years = release_year_facet.len(),
            "Title search finished"
        );

        Ok(SearchResult {
            search_results: matches.iter().map(Movie::summary).collect(),
            genre_facet,
            release_year_facet,
            votes_facet,
        })
    }
}
