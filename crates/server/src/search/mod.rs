//! Snack search.
//!
//! Matching sales come from [`LineItemRepository::search_by_name`] and are
//! cached briefly in memory via `moka`, since the page re-queries on every
//! keystroke. The per-item reduction lives in [`latest`] and runs on every
//! request so that store filter changes never need a database round-trip.

pub mod latest;

use std::sync::Arc;

use moka::future::Cache;
use sqlx::PgPool;
use tracing::{debug, error, instrument};

use snackfinder_core::StoreSelection;

use crate::config::SearchConfig;
use crate::db::{LineItemRepository, RepositoryError};
use crate::models::LineItem;

pub use latest::{LatestSale, group_key, latest_per_item};

/// Upper bound on distinct queries kept in the cache.
const CACHE_CAPACITY: u64 = 1_000;

/// Result of a search from the page's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The query was too short to search.
    Idle,
    /// Nothing in the sales history matched.
    NotFound,
    /// Matches after reduction. May be empty if every match was filtered out.
    Found(Vec<LatestSale>),
    /// The database could not be queried.
    Failed,
}

impl SearchOutcome {
    /// The cards to render.
    #[must_use]
    pub fn sales(&self) -> &[LatestSale] {
        match self {
            Self::Found(sales) => sales,
            _ => &[],
        }
    }

    /// The message for the error box, if any.
    #[must_use]
    pub const fn error_message(&self) -> Option<&'static str> {
        match self {
            Self::NotFound => Some("Item not found"),
            Self::Failed => Some("Error searching for item"),
            Self::Idle | Self::Found(_) => None,
        }
    }
}

/// Cached search over the sales history.
///
/// Cheaply cloneable; clones share the cache.
#[derive(Clone)]
pub struct SearchService {
    inner: Arc<SearchServiceInner>,
}

struct SearchServiceInner {
    pool: PgPool,
    cache: Cache<String, Arc<Vec<LineItem>>>,
    min_query_len: usize,
}

impl SearchService {
    /// Create a search service over `pool`.
    #[must_use]
    pub fn new(pool: PgPool, config: &SearchConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(config.cache_ttl)
            .build();

        Self {
            inner: Arc::new(SearchServiceInner {
                pool,
                cache,
                min_query_len: config.min_query_len,
            }),
        }
    }

    /// Whether `query` is long enough for the page to search.
    ///
    /// Blank queries never are, whatever the configured minimum.
    #[must_use]
    pub fn is_searchable(&self, query: &str) -> bool {
        is_searchable(query, self.inner.min_query_len)
    }

    /// All sales whose name contains `query`, newest first.
    ///
    /// `query` is matched exactly as given, surrounding whitespace included.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails. Failures are not cached.
    #[instrument(skip(self))]
    pub async fn matches(&self, query: &str) -> Result<Arc<Vec<LineItem>>, RepositoryError> {
        let cache_key = cache_key(query);

        if let Some(items) = self.inner.cache.get(&cache_key).await {
            debug!("Search cache hit");
            return Ok(items);
        }

        let items = Arc::new(
            LineItemRepository::new(&self.inner.pool)
                .search_by_name(query)
                .await?,
        );

        self.inner.cache.insert(cache_key, Arc::clone(&items)).await;
        Ok(items)
    }

    /// Search and reduce to the latest sale per item within `selection`.
    ///
    /// The page trims what was typed before searching.
    #[instrument(skip(self))]
    pub async fn latest(&self, query: &str, selection: StoreSelection) -> SearchOutcome {
        if !self.is_searchable(query) {
            return SearchOutcome::Idle;
        }

        match self.matches(query.trim()).await {
            Ok(items) if items.is_empty() => SearchOutcome::NotFound,
            Ok(items) => SearchOutcome::Found(
                latest_per_item(&items, selection)
                    .into_iter()
                    .map(LatestSale::from)
                    .collect(),
            ),
            Err(e) => {
                error!(error = %e, "Search failed");
                SearchOutcome::Failed
            }
        }
    }
}

/// Cache key for a query. Matching is case-insensitive but whitespace-sensitive,
/// so the key is too.
fn cache_key(query: &str) -> String {
    query.to_lowercase()
}

fn is_searchable(query: &str, min_len: usize) -> bool {
    let trimmed = query.trim();
    !trimmed.is_empty() && trimmed.chars().count() >= min_len
}
