//! API Module
//!
//! HTTP handlers and routing for the storefront REST API.
//!
//! # Endpoints
//! - `GET /products` - Full catalog listing
//! - `GET /products/:id` - Single product
//! - `GET /cart` / `DELETE /cart` - View or clear the cart
//! - `POST /cart/items` - Add a product to the cart
//! - `PUT /cart/items/:id` / `DELETE /cart/items/:id` - Edit a line
//! - `POST /checkout` - Place an order from the cart
//! - `GET /orders` - Order history
//! - `GET /stats` - Catalog cache counters
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
