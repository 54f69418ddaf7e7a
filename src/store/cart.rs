//! Cart Store Module
//!
//! The active shopping cart: a mapping from product id to line item with a
//! derived total. All mutation goes through the operations here; the total
//! is recomputed from the lines on every read so it can never drift.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::error::{Result, StoreError};

// == Cart Line ==
/// One product-and-quantity pair within the cart.
///
/// Carries the product attributes the cart needs (`id`, `title`, `price`,
/// `image`), copied from the canonical catalog record at insertion time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product id; the cart holds at most one line per id
    pub id: u32,
    /// Product title
    pub title: String,
    /// Unit price at insertion time
    pub price: Decimal,
    /// Product image URL
    pub image: String,
    /// Units of this product in the cart, always >= 1
    pub quantity: u32,
}

// == Cart Store ==
/// Mutable cart state, keyed by product id.
#[derive(Debug, Default)]
pub struct CartStore {
    lines: HashMap<u32, CartLine>,
}

impl CartStore {
    // == Constructor ==
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    // == Add To Cart ==
    /// Adds one unit of a product.
    ///
    /// An existing line for the product id has its quantity incremented;
    /// otherwise a new line with quantity 1 is inserted, copying the
    /// product's id, title, price and image.
    pub fn add_to_cart(&mut self, product: &Product) {
        self.lines
            .entry(product.id)
            .and_modify(|line| line.quantity += 1)
            .or_insert_with(|| CartLine {
                id: product.id,
                title: product.title.clone(),
                price: product.price,
                image: product.image.clone(),
                quantity: 1,
            });
    }

    // == Update Quantity ==
    /// Sets the quantity of an existing line.
    ///
    /// A quantity below 1 expresses removal intent and behaves exactly like
    /// [`CartStore::remove_from_cart`]. An absent id is rejected with
    /// [`StoreError::NotFound`] without mutating anything.
    pub fn update_quantity(&mut self, id: u32, quantity: i64) -> Result<()> {
        if !self.lines.contains_key(&id) {
            return Err(StoreError::NotFound(format!("no cart line for product {id}")));
        }

        if quantity < 1 {
            self.lines.remove(&id);
            return Ok(());
        }

        let quantity = u32::try_from(quantity)
            .map_err(|_| StoreError::InvalidMutation(format!("quantity {quantity} out of range")))?;

        if let Some(line) = self.lines.get_mut(&id) {
            line.quantity = quantity;
        }
        Ok(())
    }

    // == Remove From Cart ==
    /// Deletes the line for `id` if present; no-op otherwise.
    pub fn remove_from_cart(&mut self, id: u32) {
        self.lines.remove(&id);
    }

    // == Clear ==
    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    // == Total ==
    /// Cart total: sum of `price * quantity` over all lines.
    ///
    /// Recomputed from the lines on every call; never cached separately.
    pub fn total(&self) -> Decimal {
        self.lines
            .values()
            .map(|line| line.price * Decimal::from(line.quantity))
            .sum()
    }

    // == Total Items ==
    /// Sum of quantities over all lines.
    pub fn total_items(&self) -> u32 {
        self.lines.values().map(|line| line.quantity).sum()
    }

    // == Snapshot ==
    /// Deep copy of the current lines, ordered by product id.
    ///
    /// Checkout consumes this so a finalized order can never alias live
    /// cart state.
    pub fn snapshot(&self) -> Vec<CartLine> {
        let mut lines: Vec<CartLine> = self.lines.values().cloned().collect();
        lines.sort_by_key(|line| line.id);
        lines
    }

    // == Length ==
    /// Number of distinct lines in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
