//! Cart Store Module
//!
//! Ordered line items keyed by product id, with synchronous change
//! notification. Insertion order is display order.

use std::fmt;

use tracing::debug;

use crate::cart::{CartLineItem, QuantityPolicy};
use crate::catalog::{Money, Product, ProductId};
use crate::error::{Result, StorefrontError};

// == Cart Event ==
/// Mutation just applied to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    Added { product_id: ProductId, quantity: u32 },
    QuantityChanged { product_id: ProductId, quantity: u32 },
    Removed { product_id: ProductId },
    Cleared,
}

/// Called after every mutation with the event and the updated cart.
pub type Listener = Box<dyn Fn(&CartEvent, &CartStore) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

// == Cart Store ==
pub struct CartStore {
    items: Vec<CartLineItem>,
    policy: QuantityPolicy,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl CartStore {
    pub fn new(policy: QuantityPolicy) -> Self {
        Self {
            items: Vec::new(),
            policy,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn policy(&self) -> QuantityPolicy {
        self.policy
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.product_id() == product_id)
    }

    fn notify(&self, event: CartEvent) {
        debug!(?event, item_count = self.item_count(), "cart updated");
        for (_, listener) in &self.listeners {
            listener(&event, self);
        }
    }

    // == Add To Cart ==
    /// Adds one unit of `product`.
    ///
    /// Increments the existing line item or appends a new one. The snapshot
    /// is replaced with the product passed in. Stock is not checked here:
    /// callers only offer the action for purchasable products.
    pub fn add_to_cart(&mut self, product: &Product) {
        let quantity = match self.position(product.id) {
            Some(index) => {
                let item = &mut self.items[index];
                item.product = product.clone();
                item.quantity = item.quantity.saturating_add(1);
                item.quantity
            }
            None => {
                self.items.push(CartLineItem::new(product.clone()));
                1
            }
        };

        self.notify(CartEvent::Added {
            product_id: product.id,
            quantity,
        });
    }

    // == Update Quantity ==
    /// Sets the quantity of an existing line item.
    ///
    /// Returns the quantity actually applied. Non-positive quantities are
    /// rejected; removal goes through [`remove_from_cart`](Self::remove_from_cart).
    /// Requests above the snapshot stock are clamped or rejected per policy.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> Result<u32> {
        if quantity <= 0 {
            return Err(StorefrontError::InvalidQuantity(quantity));
        }
        let index = self
            .position(product_id)
            .ok_or(StorefrontError::StaleReference(product_id))?;

        let requested = u32::try_from(quantity).unwrap_or(u32::MAX);
        let available = self.items[index].product.stock;

        let applied = if requested <= available {
            requested
        } else {
            match self.policy {
                QuantityPolicy::Clamp if available > 0 => available,
                _ => {
                    return Err(StorefrontError::ExceedsStock {
                        product_id,
                        requested,
                        available,
                    })
                }
            }
        };

        self.items[index].quantity = applied;
        self.notify(CartEvent::QuantityChanged {
            product_id,
            quantity: applied,
        });
        Ok(applied)
    }

    // == Remove From Cart ==
    /// Deletes the line item. Returns false, and notifies no one, if absent.
    pub fn remove_from_cart(&mut self, product_id: ProductId) -> bool {
        match self.position(product_id) {
            Some(index) => {
                self.items.remove(index);
                self.notify(CartEvent::Removed { product_id });
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.items.clear();
        self.notify(CartEvent::Cleared);
    }

    // == Derived Values ==
    /// Sum of snapshot price times quantity, computed on each call.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartLineItem::subtotal).sum()
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    pub fn line_items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn get(&self, product_id: ProductId) -> Option<&CartLineItem> {
        self.position(product_id).map(|index| &self.items[index])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // == Subscriptions ==
    pub fn subscribe(
        &mut self,
        listener: impl Fn(&CartEvent, &CartStore) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() < before
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new(QuantityPolicy::default())
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .field("policy", &self.policy)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
