//! Line item domain types.

use snackfinder_core::{LineItemId, Price, SaleTimestamp};

/// A single sold item, joined with the storefront of its order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    /// Database ID of this line item.
    pub id: LineItemId,
    /// Item name as printed on the receipt.
    pub name: String,
    /// Sale price.
    pub price: Price,
    /// When the item was sold.
    pub created: SaleTimestamp,
    /// Vending catalogue ID, if the machine reported one.
    pub item_id: Option<String>,
    /// Raw `orders.storefront` value. `None` when the order or its storefront is missing.
    pub storefront: Option<String>,
}

/// An order to insert.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub storefront: Option<String>,
    pub created: SaleTimestamp,
}

/// A line item to insert alongside its order.
#[derive(Debug, Clone)]
pub struct NewLineItem {
    pub name: String,
    pub price: Price,
    pub created: SaleTimestamp,
    pub item_id: Option<String>,
}
