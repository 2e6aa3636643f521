//! Seed the sales database from a JSON fixture.
//!
//! The fixture is an array of orders, each with its line items:
//!
//! ```json
//! [
//!   {
//!     "storefront": "snaxa",
//!     "createdtime": 1727964300000,
//!     "items": [
//!       { "name": "Hot Cheetos", "price": 125, "item_id": "A7" },
//!       { "name": "Takis", "price": 150, "createdtime": 1727964360000 }
//!     ]
//!   }
//! ]
//! ```
//!
//! Prices are in cents and times in epoch milliseconds. An item without its
//! own `createdtime` takes the order's.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use snackfinder_core::{Price, SaleTimestamp};
use snackfinder_server::config::database_url_from_env;
use snackfinder_server::db::{self, LineItemRepository, OrderRepository};
use snackfinder_server::models::{NewLineItem, NewOrder};

/// One order in the fixture.
#[derive(Debug, Deserialize)]
pub struct FixtureOrder {
    #[serde(default)]
    pub storefront: Option<String>,
    pub createdtime: SaleTimestamp,
    pub items: Vec<FixtureItem>,
}

/// One line item in the fixture.
#[derive(Debug, Deserialize)]
pub struct FixtureItem {
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub createdtime: Option<SaleTimestamp>,
    #[serde(default)]
    pub item_id: Option<String>,
}

impl FixtureOrder {
    fn into_rows(self) -> (NewOrder, Vec<NewLineItem>) {
        let created = self.createdtime;
        let items = self
            .items
            .into_iter()
            .map(|item| NewLineItem {
                name: item.name,
                price: item.price,
                created: item.createdtime.unwrap_or(created),
                item_id: item.item_id,
            })
            .collect();

        (
            NewOrder {
                storefront: self.storefront,
                created,
            },
            items,
        )
    }
}

/// Parse fixture JSON.
///
/// # Errors
///
/// Returns `serde_json::Error` if the JSON doesn't match the fixture shape.
pub fn parse_fixture(json: &str) -> Result<Vec<FixtureOrder>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Insert every order in the fixture at `path`.
///
/// Each order is its own transaction, so a failure leaves earlier orders in place.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if an insert fails.
pub async fn run(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let database_url = database_url_from_env()?;

    if !path.exists() {
        return Err(format!("File not found: {}", path.display()).into());
    }

    info!(path = %path.display(), "Loading fixture");
    let content = tokio::fs::read_to_string(path).await?;
    let orders = parse_fixture(&content)?;
    info!(orders = orders.len(), "Parsed fixture");

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let repo = OrderRepository::new(&pool);
    let mut inserted_items = 0;
    for fixture in orders {
        let (order, items) = fixture.into_rows();
        let (order_id, item_ids) = repo.create_with_items(&order, &items).await?;
        inserted_items += item_ids.len();
        info!(%order_id, items = item_ids.len(), "Inserted order");
    }

    let total = LineItemRepository::new(&pool).count().await?;
    info!(inserted_items, total, "Seeding complete");
    Ok(())
}
