//! JSON API.
//!
//! ```text
//! GET /api/search?query=…   - Raw matching sales, newest first
//! ```

pub mod search;

use axum::{Router, routing::get};

use crate::middleware::{json_rate_limit_rejection, search_rate_limiter};
use crate::state::AppState;

/// Create the API routes router, mounted at `/api`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/search",
            get(search::search).fallback(search::method_not_allowed),
        )
        .route_layer(search_rate_limiter())
        .route_layer(axum::middleware::from_fn(json_rate_limit_rejection))
}
