//! Domain models for sales data.
//!
//! These are validated domain objects, separate from the database row types
//! in [`crate::db`].

pub mod lineitem;

pub use lineitem::{LineItem, NewLineItem, NewOrder};
