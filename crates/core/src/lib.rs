//! Snack Finder Core - Shared types library.
//!
//! This crate provides the domain types used across all Snack Finder components:
//! - `server` - The search page and search API
//! - `cli` - Command-line tools for migrations, seeding, and ad-hoc searches
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, sale timestamps, and storefronts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
