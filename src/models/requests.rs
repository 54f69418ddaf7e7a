//! Request DTOs for the storefront API
//!
//! Defines the structure of incoming HTTP request bodies. Checkout carries
//! its own field validation; everything behind the boundary trusts it.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

/// Permissive phone pattern: optional leading `+`, then digits, spaces,
/// dashes and parentheses.
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[\d\s\-()]+$").expect("phone pattern is valid"));

// == Add Item Request ==
/// Request body for POST /cart/items.
///
/// Only the product id is accepted; the canonical attributes are resolved
/// through the catalog cache so a client can never insert a line with a
/// made-up price.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    /// Id of the product to add
    pub product_id: u32,
}

// == Update Quantity Request ==
/// Request body for PUT /cart/items/:id.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    /// New quantity; below 1 removes the line
    pub quantity: i64,
}

// == Checkout Request ==
/// Request body for POST /checkout.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Customer's full name
    pub customer_name: String,
    /// Delivery address
    pub shipping_address: String,
    /// Contact phone number
    pub phone_number: String,
}

impl CheckoutRequest {
    /// Validates the checkout fields.
    ///
    /// # Returns
    /// - `None` if the request is valid
    /// - `Some(error_message)` describing the first failed check
    pub fn validate(&self) -> Option<String> {
        if self.customer_name.trim().is_empty() {
            return Some("customerName must not be empty".to_string());
        }
        if self.shipping_address.trim().is_empty() {
            return Some("shippingAddress must not be empty".to_string());
        }
        if self.phone_number.trim().is_empty() {
            return Some("phoneNumber must not be empty".to_string());
        }
        if !PHONE_PATTERN.is_match(self.phone_number.trim()) {
            return Some("phoneNumber is not a valid phone number".to_string());
        }
        None
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn checkout(name: &str, address: &str, phone: &str) -> CheckoutRequest {
        CheckoutRequest {
            customer_name: name.to_string(),
            shipping_address: address.to_string(),
            phone_number: phone.to_string(),
        }
    }

    #[test]
    fn test_valid_checkout_passes() {
        assert!(checkout("Jane Doe", "1 Main St", "+1 (555) 010-0199")
            .validate()
            .is_none());
    }

    #[test]
    fn test_empty_name_rejected() {
        let error = checkout("  ", "1 Main St", "555-0100").validate();
        assert!(error.unwrap().contains("customerName"));
    }

    #[test]
    fn test_empty_address_rejected() {
        let error = checkout("Jane", "", "555-0100").validate();
        assert!(error.unwrap().contains("shippingAddress"));
    }

    #[test]
    fn test_alphabetic_phone_rejected() {
        let error = checkout("Jane", "1 Main St", "call me maybe").validate();
        assert!(error.unwrap().contains("phoneNumber"));
    }

    #[test]
    fn test_camel_case_deserialization() {
        let json = r#"{"customerName":"Jane","shippingAddress":"1 Main St","phoneNumber":"555-0100"}"#;
        let request: CheckoutRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.customer_name, "Jane");
        assert!(request.validate().is_none());
    }
}
