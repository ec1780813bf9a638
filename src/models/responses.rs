//! Response DTOs for the storefront API

use serde::Serialize;

use crate::cart::{CartLineItem, CartStore};
use crate::catalog::ProductId;
use crate::query::QueryStats;

/// One line of the cart body
#[derive(Debug, Clone, Serialize)]
pub struct CartItemResponse {
    pub product_id: ProductId,
    pub title: String,
    /// Formatted snapshot price, e.g. "$799.99"
    pub unit_price: String,
    pub quantity: u32,
    pub subtotal: String,
}

impl From<&CartLineItem> for CartItemResponse {
    fn from(item: &CartLineItem) -> Self {
        Self {
            product_id: item.product_id(),
            title: item.product.title.clone(),
            unit_price: item.product.price.to_string(),
            quantity: item.quantity,
            subtotal: item.subtotal().to_string(),
        }
    }
}

/// Response body for the cart endpoints
#[derive(Debug, Clone, Serialize)]
pub struct CartResponse {
    /// Line items in display order
    pub items: Vec<CartItemResponse>,
    pub item_count: u64,
    /// Formatted total, e.g. "$1599.98"
    pub total: String,
    pub total_cents: u64,
}

impl CartResponse {
    pub fn from_cart(cart: &CartStore) -> Self {
        let total = cart.total();
        Self {
            items: cart.line_items().iter().map(CartItemResponse::from).collect(),
            item_count: cart.item_count(),
            total: total.to_string(),
            total_cents: total.amount_cents,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub deduplicated: u64,
    pub fetches: u64,
    pub failures: u64,
    pub evictions: u64,
    pub total_entries: usize,
    /// Share of reads served without a new fetch
    pub hit_rate: f64,
}

impl From<QueryStats> for StatsResponse {
    fn from(stats: QueryStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            deduplicated: stats.deduplicated,
            fetches: stats.fetches,
            failures: stats.failures,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::phone;

    #[test]
    fn test_cart_response_totals() {
        let mut cart = CartStore::default();
        let product = phone(1, 25);
        cart.add_to_cart(&product);
        cart.add_to_cart(&product);

        let resp = CartResponse::from_cart(&cart);
        assert_eq!(resp.item_count, 2);
        assert_eq!(resp.total, "$1599.98");
        assert_eq!(resp.total_cents, 159998);
        assert_eq!(resp.items.len(), 1);
        assert_eq!(resp.items[0].unit_price, "$799.99");
        assert_eq!(resp.items[0].quantity, 2);
    }

    #[test]
    fn test_empty_cart_serialize() {
        let resp = CartResponse::from_cart(&CartStore::default());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["item_count"], 0);
        assert_eq!(json["total"], "$0.00");
        assert!(json["items"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let stats = QueryStats {
            hits: 6,
            misses: 2,
            deduplicated: 2,
            ..QueryStats::default()
        };
        let resp = StatsResponse::from(stats);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Product not found: 999");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("Product not found: 999"));
    }
}
