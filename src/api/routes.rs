//! API Routes
//!
//! Configures the Axum router with all storefront endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    add_item_handler, checkout_handler, clear_cart_handler, get_cart_handler,
    get_product_handler, health_handler, list_orders_handler, list_products_handler,
    remove_item_handler, stats_handler, update_item_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /products` - Full catalog listing
/// - `GET /products/:id` - Single product
/// - `GET /cart` - Current cart view
/// - `POST /cart/items` - Add a product to the cart
/// - `PUT /cart/items/:id` - Set a line's quantity
/// - `DELETE /cart/items/:id` - Remove a line
/// - `DELETE /cart` - Clear the cart
/// - `POST /checkout` - Place an order from the cart
/// - `GET /orders` - Order history
/// - `GET /stats` - Catalog cache counters
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/products", get(list_products_handler))
        .route("/products/:id", get(get_product_handler))
        .route("/cart", get(get_cart_handler).delete(clear_cart_handler))
        .route("/cart/items", post(add_item_handler))
        .route(
            "/cart/items/:id",
            put(update_item_handler).delete(remove_item_handler),
        )
        .route("/checkout", post(checkout_handler))
        .route("/orders", get(list_orders_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use rust_decimal_macros::dec;
    use tower::util::ServiceExt;

    use crate::catalog::{CatalogCache, CatalogSource, Product, Rating};
    use crate::error::{Result, StoreError};

    struct FixtureSource;

    #[async_trait]
    impl CatalogSource for FixtureSource {
        async fn fetch_all(&self) -> Result<Vec<Product>> {
            Ok(vec![Product {
                id: 1,
                title: "Product 1".to_string(),
                price: dec!(10.00),
                description: "desc".to_string(),
                category: "cat".to_string(),
                image: "https://example.com/p.jpg".to_string(),
                rating: Rating {
                    rate: dec!(4.0),
                    count: 1,
                },
            }])
        }

        async fn fetch_by_id(&self, id: u32) -> Result<Product> {
            Err(StoreError::NotFound(format!("no product {id}")))
        }
    }

    fn create_test_app() -> Router {
        let catalog = CatalogCache::new(Arc::new(FixtureSource), Duration::from_secs(300));
        create_router(AppState::new(catalog))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_products_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/products")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_product_is_404() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/products/999")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_empty_cart_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(Request::builder().uri("/cart").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
