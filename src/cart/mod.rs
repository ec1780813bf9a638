//! Cart Module
//!
//! In-memory shopping cart: ordered line items with a derived total and
//! item count, and synchronous notification of every mutation.

mod line_item;
mod store;


pub use line_item::{CartLineItem, QuantityPolicy};
pub use store::{CartEvent, CartStore, Listener, SubscriptionId};
