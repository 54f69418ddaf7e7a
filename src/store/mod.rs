//! Store Module
//!
//! The cart and order stores: synchronous, reducer-style state owned by the
//! application and mutated only through the operations defined here.

mod cart;
mod orders;


// Re-export public types
pub use cart::{CartLine, CartStore};
pub use orders::{Order, OrderStore};
