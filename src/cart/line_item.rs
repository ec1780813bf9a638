//! Cart line items and the quantity policy.

use std::str::FromStr;

use serde::Serialize;

use crate::catalog::{Money, Product, ProductId};

// == Line Item ==
/// One product's entry in the cart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLineItem {
    /// Snapshot of the product as last handed to the cart
    pub product: Product,
    /// Always at least 1
    pub quantity: u32,
}

impl CartLineItem {
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Snapshot price times quantity.
    pub fn subtotal(&self) -> Money {
        self.product.price * self.quantity
    }
}

// == Quantity Policy ==
/// What `update_quantity` does with a request above the known stock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuantityPolicy {
    /// Lower the quantity to the stock
    #[default]
    Clamp,
    /// Refuse the update
    Reject,
}

impl FromStr for QuantityPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clamp" => Ok(QuantityPolicy::Clamp),
            "reject" => Ok(QuantityPolicy::Reject),
            other => Err(format!("unknown quantity policy: {}", other)),
        }
    }
}
