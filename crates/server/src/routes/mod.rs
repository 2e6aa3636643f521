//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                  - Search page (server-rendered, works without JS)
//! GET  /search/results    - Results fragment (HTMX)
//! GET  /api/search        - Raw matching sales as JSON
//! GET  /health            - Liveness check
//! GET  /health/ready      - Readiness check (database)
//! ```

pub mod api;
pub mod health;
pub mod search;

use axum::Router;

use crate::state::AppState;

/// Create all routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(search::router())
        .nest("/api", api::router())
}
