//! Product Types
//!
//! Wire types for records served by the remote catalog. Products are
//! immutable once fetched; everything downstream of the catalog cache
//! treats them as read-only.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// == Product ==
/// A single purchasable product as served by the remote catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product id
    pub id: u32,
    /// Display title
    pub title: String,
    /// Unit price, non-negative
    pub price: Decimal,
    /// Long-form description
    pub description: String,
    /// Category label
    pub category: String,
    /// Image URL
    pub image: String,
    /// Aggregate customer rating
    pub rating: Rating,
}

// == Rating ==
/// Aggregate rating attached to a product (0-5 scale).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average rating between 0 and 5
    pub rate: Decimal,
    /// Number of ratings contributing to the average
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_product_deserializes_catalog_payload() {
        // Shape served by the remote catalog: prices arrive as JSON numbers.
        let json = r#"{
            "id": 1,
            "title": "Backpack",
            "price": 109.95,
            "description": "Fits 15 inch laptops",
            "category": "men's clothing",
            "image": "https://example.com/backpack.jpg",
            "rating": {"rate": 3.9, "count": 120}
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, 1);
        assert_eq!(product.price, dec!(109.95));
        assert_eq!(product.rating.rate, dec!(3.9));
        assert_eq!(product.rating.count, 120);
    }

    #[test]
    fn test_product_rejects_malformed_payload() {
        let json = r#"{"id": "not-a-number", "title": 7}"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }
}
