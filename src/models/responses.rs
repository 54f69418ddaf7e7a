//! Response DTOs for the storefront API
//!
//! Defines the structure of outgoing HTTP response bodies.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::CatalogStats;
use crate::store::CartLine;

// == Cart Response ==
/// View of the current cart returned by every cart endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    /// Current lines, ordered by product id
    pub items: Vec<CartLine>,
    /// Sum of `price * quantity` over the lines
    pub total: Decimal,
    /// Sum of quantities over the lines
    pub total_items: u32,
}

impl CartResponse {
    /// Builds a cart view from a snapshot of the lines.
    pub fn new(items: Vec<CartLine>, total: Decimal, total_items: u32) -> Self {
        Self {
            items,
            total,
            total_items,
        }
    }
}

// == Stats Response ==
/// Catalog cache counters returned by GET /stats.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    /// Reads served from a fresh entry
    pub hits: u64,
    /// Reads that triggered an outbound fetch
    pub misses: u64,
    /// Reads that joined an in-flight fetch
    pub coalesced: u64,
    /// Successful fetch completions
    pub refreshes: u64,
    /// hits / (hits + misses + coalesced)
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Builds the response from a stats snapshot.
    pub fn new(stats: &CatalogStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            coalesced: stats.coalesced,
            refreshes: stats.refreshes,
            hit_rate: stats.hit_rate(),
        }
    }
}

// == Health Response ==
/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "healthy" while the server is able to respond
    pub status: String,
}

impl HealthResponse {
    /// Creates a healthy status response.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_response_serializes_camel_case() {
        let response = CartResponse::new(vec![], Decimal::ZERO, 0);
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("totalItems").is_some());
        assert!(json.get("items").is_some());
    }

    #[test]
    fn test_stats_response_from_counters() {
        let mut stats = CatalogStats::new();
        stats.record_hit();
        stats.record_miss();

        let response = StatsResponse::new(&stats);
        assert_eq!(response.hits, 1);
        assert_eq!(response.misses, 1);
        assert_eq!(response.hit_rate, 0.5);
    }

    #[test]
    fn test_health_response() {
        assert_eq!(HealthResponse::healthy().status, "healthy");
    }
}
