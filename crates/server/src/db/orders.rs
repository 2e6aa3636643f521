//! Order repository, used by the CLI seeder.

use sqlx::PgPool;

use snackfinder_core::{LineItemId, OrderId, Price};

use super::RepositoryError;
use crate::models::{NewLineItem, NewOrder};

/// Repository for order writes.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert an order and its line items in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidInput` if a price does not fit the
    /// `INTEGER` column, or `RepositoryError::Database` if any insert fails.
    /// Nothing is written on error.
    pub async fn create_with_items(
        &self,
        order: &NewOrder,
        items: &[NewLineItem],
    ) -> Result<(OrderId, Vec<LineItemId>), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let (order_id,): (i32,) = sqlx::query_as(
            r"
            INSERT INTO orders (storefront, createdtime)
            VALUES ($1, $2)
            RETURNING id
            ",
        )
        .bind(order.storefront.as_deref())
        .bind(order.created.as_millis())
        .fetch_one(&mut *tx)
        .await?;

        let mut item_ids = Vec::with_capacity(items.len());
        for item in items {
            let (item_id,): (i32,) = sqlx::query_as(
                r"
                INSERT INTO lineitems (name, price, createdtime, item_id, order_id)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id
                ",
            )
            .bind(&item.name)
            .bind(price_column(item.price)?)
            .bind(item.created.as_millis())
            .bind(item.item_id.as_deref())
            .bind(order_id)
            .fetch_one(&mut *tx)
            .await?;
            item_ids.push(LineItemId::new(item_id));
        }

        tx.commit().await?;

        Ok((OrderId::new(order_id), item_ids))
    }
}

/// Convert a price to the `lineitems.price` column type.
fn price_column(price: Price) -> Result<i32, RepositoryError> {
    i32::try_from(price.cents()).map_err(|_| {
        RepositoryError::InvalidInput(format!("price {} cents is out of range", price.cents()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_column_in_range() {
        assert!(matches!(price_column(Price::from_cents(150)), Ok(150)));
    }

    #[test]
    fn test_price_column_out_of_range() {
        let err = price_column(Price::from_cents(i64::from(i32::MAX) + 1));
        assert!(matches!(err, Err(RepositoryError::InvalidInput(_))));
    }
}
