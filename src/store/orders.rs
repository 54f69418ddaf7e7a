//! Order Store Module
//!
//! Append-only log of finalized orders. Orders are write-once, read-many:
//! once created they are never mutated or deleted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::catalog::current_timestamp_ms;
use crate::store::CartLine;

// == Order ==
/// A finalized order: checkout details plus a snapshot of the cart at
/// submission time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Globally unique id, `ORD-<unix ms>-<random suffix>`
    pub id: String,
    /// Customer's full name
    pub customer_name: String,
    /// Delivery address
    pub shipping_address: String,
    /// Contact phone number
    pub phone_number: String,
    /// Deep snapshot of the cart lines; never aliases live cart state
    pub items: Vec<CartLine>,
    /// Sum of quantities across the snapshot
    pub total_items: u32,
    /// Sum of `price * quantity` across the snapshot
    pub total_amount: Decimal,
    /// Creation timestamp, serialized RFC 3339
    pub order_date: DateTime<Utc>,
}

// == Order Store ==
/// Order history in insertion order (oldest first).
#[derive(Debug, Default)]
pub struct OrderStore {
    orders: Vec<Order>,
}

impl OrderStore {
    // == Constructor ==
    /// Creates an empty order store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Add Order ==
    /// Appends a new order and returns it.
    ///
    /// Generates a fresh id and creation timestamp and deep-copies `items`,
    /// so later mutation of the caller's collection can never retroactively
    /// change the stored order. Inputs are trusted as already validated by
    /// the checkout boundary.
    pub fn add_order(
        &mut self,
        customer_name: String,
        shipping_address: String,
        phone_number: String,
        items: &[CartLine],
        total_items: u32,
        total_amount: Decimal,
    ) -> Order {
        let order = Order {
            id: generate_order_id(),
            customer_name,
            shipping_address,
            phone_number,
            items: items.to_vec(),
            total_items,
            total_amount,
            order_date: Utc::now(),
        };

        self.orders.push(order.clone());
        order
    }

    // == Orders ==
    /// All orders, oldest first, read-only.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    // == Length ==
    /// Number of orders placed so far.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Returns true if no order has been placed yet.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

// == Order Id Generation ==
/// Builds an order id from the creation timestamp plus a random suffix so
/// rapid successive submissions in the same millisecond stay distinct.
fn generate_order_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("ORD-{}-{}", current_timestamp_ms(), &suffix[..9])
}
