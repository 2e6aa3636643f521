//! Line item repository.
//!
//! Queries are built at runtime with `query_as` so the crate compiles
//! without a live database or an offline query cache.

use sqlx::PgPool;
use tracing::{debug, instrument};

use snackfinder_core::{LineItemId, Price, SaleTimestamp};

use super::RepositoryError;
use crate::models::LineItem;

/// Repository for line item reads.
pub struct LineItemRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LineItemRepository<'a> {
    /// Create a new line item repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Find every line item whose name contains `query`, ignoring case.
    ///
    /// `%`, `_` and `\` in `query` match literally. Each item carries the
    /// storefront of its order; items with no order come back with `None`.
    /// Results are ordered newest sale first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn search_by_name(&self, query: &str) -> Result<Vec<LineItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, LineItemRow>(
            r"
            SELECT l.id, l.name, l.price, l.createdtime, l.item_id, o.storefront
            FROM lineitems l
            LEFT JOIN orders o ON o.id = l.order_id
            WHERE l.name ILIKE '%' || $1 || '%' ESCAPE '\'
            ORDER BY l.createdtime DESC, l.id DESC
            ",
        )
        .bind(escape_like(query))
        .fetch_all(self.pool)
        .await?;

        debug!(count = rows.len(), "Found matching line items");
        Ok(rows.into_iter().map(LineItem::from).collect())
    }

    /// Count all line items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM lineitems")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

/// Internal row type for the search query.
#[derive(sqlx::FromRow)]
struct LineItemRow {
    id: i32,
    name: String,
    price: i32,
    createdtime: i64,
    item_id: Option<String>,
    storefront: Option<String>,
}

impl From<LineItemRow> for LineItem {
    fn from(row: LineItemRow) -> Self {
        Self {
            id: LineItemId::new(row.id),
            name: row.name,
            price: Price::from(row.price),
            created: SaleTimestamp::from_millis(row.createdtime),
            item_id: row.item_id,
            storefront: row.storefront,
        }
    }
}

/// Escape `LIKE` metacharacters so user input matches literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
