//! Integration tests for Snack Finder.
//!
//! # Running Tests
//!
//! ```bash
//! # Prepare the database and start the server
//! cargo run -p snackfinder-cli -- migrate
//! cargo run -p snackfinder-server
//!
//! # Run integration tests
//! cargo test -p snackfinder-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `SNACKFINDER_BASE_URL` - Server under test (default: `http://localhost:3000`)
//! - `SNACKFINDER_DATABASE_URL` - The server's database, used to seed sales

use reqwest::{Client, Url};
use sqlx::PgPool;
use uuid::Uuid;

use snackfinder_core::{Price, SaleTimestamp};
use snackfinder_server::config::database_url_from_env;
use snackfinder_server::db::{self, OrderRepository, RepositoryError};
use snackfinder_server::models::{NewLineItem, NewOrder};

/// Base URL for the server under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("SNACKFINDER_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Shared handles for a test.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub pool: PgPool,
}

impl TestContext {
    /// Connect to the server's database and build an HTTP client.
    ///
    /// # Panics
    ///
    /// Panics if the database URL is missing or the database is unreachable.
    pub async fn new() -> Self {
        let database_url = database_url_from_env().expect("SNACKFINDER_DATABASE_URL not set");
        let pool = db::create_pool(&database_url)
            .await
            .expect("Failed to connect to test database");

        Self {
            client: Client::new(),
            base_url: base_url(),
            pool,
        }
    }

    /// Absolute URL for `path` on the server under test, with `params`
    /// form-encoded into the query string.
    ///
    /// # Panics
    ///
    /// Panics if the base URL is not a valid URL.
    #[must_use]
    pub fn url(&self, path: &str, params: &[(&str, &str)]) -> Url {
        let mut url = Url::parse(&format!("{}{path}", self.base_url)).expect("invalid base URL");
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        url
    }

    /// Record one sale as its own order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the insert fails.
    pub async fn record_sale(
        &self,
        name: &str,
        cents: i64,
        millis: i64,
        storefront: Option<&str>,
    ) -> Result<(), RepositoryError> {
        let created = SaleTimestamp::from_millis(millis);
        let order = NewOrder {
            storefront: storefront.map(String::from),
            created,
        };
        let item = NewLineItem {
            name: name.to_string(),
            price: Price::from_cents(cents),
            created,
            item_id: None,
        };

        OrderRepository::new(&self.pool)
            .create_with_items(&order, &[item])
            .await?;
        Ok(())
    }
}

/// A product name no other test run will have used.
///
/// Search results are cached per query, so every test needs its own name.
#[must_use]
pub fn unique_item_name(prefix: &str) -> String {
    format!("{prefix} {}", Uuid::new_v4().simple())
}
