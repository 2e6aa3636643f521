//! Core types for Snack Finder.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod storefront;
pub mod timestamp;

pub use id::*;
pub use price::Price;
pub use storefront::{StoreSelection, Storefront, StorefrontError, UNKNOWN_STORE_KEY};
pub use timestamp::SaleTimestamp;
