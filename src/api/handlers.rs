//! API Handlers
//!
//! HTTP request handlers for each storefront endpoint. Handlers only call
//! the catalog/cart/order operations; all cart and order mutation happens
//! under a write lock so no request can observe a half-applied change.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tokio::sync::RwLock;
use tracing::info;

use crate::catalog::{CatalogCache, HttpCatalogSource, Product};
use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::models::{
    AddItemRequest, CartResponse, CheckoutRequest, HealthResponse, StatsResponse,
    UpdateQuantityRequest,
};
use crate::store::{CartStore, Order, OrderStore};

// == App State ==
/// Application state shared across all handlers.
///
/// The catalog cache carries its own internal synchronization; the cart and
/// order stores are synchronous and sit behind an RwLock each.
#[derive(Clone)]
pub struct AppState {
    /// Read-through product cache
    pub catalog: CatalogCache,
    /// Active shopping cart
    pub cart: Arc<RwLock<CartStore>>,
    /// Order history
    pub orders: Arc<RwLock<OrderStore>>,
}

impl AppState {
    /// Creates a new AppState over the given catalog cache with empty cart
    /// and order stores.
    pub fn new(catalog: CatalogCache) -> Self {
        Self {
            catalog,
            cart: Arc::new(RwLock::new(CartStore::new())),
            orders: Arc::new(RwLock::new(OrderStore::new())),
        }
    }

    /// Creates a new AppState from configuration, wiring the catalog cache
    /// to the remote catalog over HTTP.
    pub fn from_config(config: &Config) -> Result<Self> {
        let source = HttpCatalogSource::new(
            config.catalog_base_url.clone(),
            std::time::Duration::from_secs(config.fetch_timeout_secs),
        )?;
        let catalog = CatalogCache::new(
            Arc::new(source),
            std::time::Duration::from_secs(config.stale_after_secs),
        );
        Ok(Self::new(catalog))
    }
}

/// Builds the cart view returned by every cart endpoint.
fn cart_view(cart: &CartStore) -> CartResponse {
    CartResponse::new(cart.snapshot(), cart.total(), cart.total_items())
}

// == Catalog Handlers ==

/// Handler for GET /products
///
/// Returns the full product listing through the catalog cache.
pub async fn list_products_handler(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = state.catalog.get_all().await?;
    Ok(Json(products))
}

/// Handler for GET /products/:id
///
/// Returns a single product through the catalog cache; 404 if the catalog
/// does not know the id.
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Product>> {
    let product = state.catalog.get_by_id(id).await?;
    Ok(Json(product))
}

// == Cart Handlers ==

/// Handler for GET /cart
pub async fn get_cart_handler(State(state): State<AppState>) -> Json<CartResponse> {
    let cart = state.cart.read().await;
    Json(cart_view(&cart))
}

/// Handler for POST /cart/items
///
/// Resolves the product's canonical attributes through the catalog cache,
/// then adds one unit to the cart.
pub async fn add_item_handler(
    State(state): State<AppState>,
    Json(req): Json<AddItemRequest>,
) -> Result<Json<CartResponse>> {
    // Resolve before locking: the fetch may take a while and must not hold
    // the cart.
    let product = state.catalog.get_by_id(req.product_id).await?;

    let mut cart = state.cart.write().await;
    cart.add_to_cart(&product);
    Ok(Json(cart_view(&cart)))
}

/// Handler for PUT /cart/items/:id
///
/// Sets a line's quantity; below 1 removes the line.
pub async fn update_item_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(req): Json<UpdateQuantityRequest>,
) -> Result<Json<CartResponse>> {
    let mut cart = state.cart.write().await;
    cart.update_quantity(id, req.quantity)?;
    Ok(Json(cart_view(&cart)))
}

/// Handler for DELETE /cart/items/:id
pub async fn remove_item_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Json<CartResponse> {
    let mut cart = state.cart.write().await;
    cart.remove_from_cart(id);
    Json(cart_view(&cart))
}

/// Handler for DELETE /cart
pub async fn clear_cart_handler(State(state): State<AppState>) -> Json<CartResponse> {
    let mut cart = state.cart.write().await;
    cart.clear();
    Json(cart_view(&cart))
}

// == Checkout Handler ==

/// Handler for POST /checkout
///
/// Validates the payload, snapshots the cart into a new order and clears
/// the cart, all under the cart write lock so the snapshot-and-clear pair
/// is atomic. A validation failure leaves cart and orders untouched.
pub async fn checkout_handler(
    State(state): State<AppState>,
    Json(req): Json<CheckoutRequest>,
) -> Result<Json<Order>> {
    if let Some(error_msg) = req.validate() {
        return Err(StoreError::InvalidMutation(error_msg));
    }

    let mut cart = state.cart.write().await;
    if cart.is_empty() {
        return Err(StoreError::InvalidMutation(
            "cannot check out an empty cart".to_string(),
        ));
    }

    let items = cart.snapshot();
    let total_items = cart.total_items();
    let total_amount = cart.total();

    let order = {
        let mut orders = state.orders.write().await;
        orders.add_order(
            req.customer_name,
            req.shipping_address,
            req.phone_number,
            &items,
            total_items,
            total_amount,
        )
    };
    cart.clear();

    info!(order_id = %order.id, total_items, "order placed");
    Ok(Json(order))
}

// == Order Handlers ==

/// Handler for GET /orders
///
/// Returns the order history, oldest first.
pub async fn list_orders_handler(State(state): State<AppState>) -> Json<Vec<Order>> {
    let orders = state.orders.read().await;
    Json(orders.orders().to_vec())
}

// == Observability Handlers ==

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.catalog.stats().await;
    Json(StatsResponse::new(&stats))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
