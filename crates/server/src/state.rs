//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::search::SearchService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the database pool and the search cache.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: PgPool,
    search: SearchService,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration, read for the search settings
    /// * `pool` - `PostgreSQL` connection pool
    #[must_use]
    pub fn new(config: &ServerConfig, pool: PgPool) -> Self {
        let search = SearchService::new(pool.clone(), &config.search);

        Self {
            inner: Arc::new(AppStateInner {
                pool,
                search,
            }),
        }
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the search service.
    #[must_use]
    pub fn search(&self) -> &SearchService {
        &self.inner.search
    }
}
