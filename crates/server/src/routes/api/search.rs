//! `GET /api/search`: raw matching sales as JSON.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use snackfinder_core::{Price, SaleTimestamp};

use crate::error::{ApiError, AppError};
use crate::models::LineItem;
use crate::state::AppState;

/// Query parameters for `/api/search`.
#[derive(Debug, Deserialize)]
pub struct ApiSearchQuery {
    #[serde(default)]
    pub query: Option<String>,
}

/// One sale on the wire.
///
/// Field names match the `lineitems` columns, with the order's storefront
/// nested under `orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleRecord {
    pub id: i32,
    pub name: String,
    /// Cents.
    pub price: Price,
    /// Epoch milliseconds.
    pub createdtime: SaleTimestamp,
    pub item_id: Option<String>,
    pub orders: OrderRef,
}

/// The joined order, reduced to its storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRef {
    pub storefront: Option<String>,
}

impl From<&LineItem> for SaleRecord {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id.as_i32(),
            name: item.name.clone(),
            price: item.price,
            createdtime: item.created,
            item_id: item.item_id.clone(),
            orders: OrderRef {
                storefront: item.storefront.clone(),
            },
        }
    }
}

impl ApiSearchQuery {
    /// The query to search for, exactly as sent.
    ///
    /// Whitespace only counts as missing; otherwise padding is part of the
    /// substring searched for.
    fn required(&self) -> Result<&str, AppError> {
        self.query
            .as_deref()
            .filter(|q| !q.trim().is_empty())
            .ok_or_else(|| AppError::BadRequest("Missing search query".to_string()))
    }
}

/// Every sale whose name contains `query`, newest first.
///
/// Unlike the page, the API applies no minimum length, no trimming and no
/// reduction.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<ApiSearchQuery>,
) -> Result<Json<Vec<SaleRecord>>, ApiError> {
    let query = params.required()?;

    let items = state.search().matches(query).await?;
    if items.is_empty() {
        return Err(AppError::NotFound("Item not found".to_string()).into());
    }

    Ok(Json(items.iter().map(SaleRecord::from).collect()))
}

/// Any method other than GET on `/api/search`.
pub async fn method_not_allowed() -> ApiError {
    ApiError(AppError::MethodNotAllowed)
}
