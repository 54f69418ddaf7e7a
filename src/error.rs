//! Error types for the storefront service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Store Error Enum ==
/// Unified error type for the storefront service.
///
/// `Clone` is required because catalog fetch outcomes are fanned out to every
/// coalesced waiter over a broadcast channel.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The referenced product does not exist upstream, or the cart has no
    /// line item for the given id
    #[error("Not found: {0}")]
    NotFound(String),

    /// The remote catalog could not be read (transport failure, non-success
    /// status or malformed payload); retryable
    #[error("Catalog fetch failed: {0}")]
    FetchFailure(String),

    /// A mutation was rejected before touching any state
    #[error("Invalid mutation: {0}")]
    InvalidMutation(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            StoreError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            StoreError::FetchFailure(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            StoreError::InvalidMutation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            StoreError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the storefront service.
pub type Result<T> = std::result::Result<T, StoreError>;
