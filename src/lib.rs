//! Storefront - a small shop service over a remote product catalog
//!
//! Provides a read-through catalog cache with fetch deduplication, a
//! shopping cart and an order history behind a REST API.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub use api::AppState;
pub use config::Config;
