//! Configuration Module
//!
//! Loads storefront settings from environment variables.

use std::env;
use std::str::FromStr;

use crate::cart::QuantityPolicy;

/// Storefront configuration.
///
/// Every value can be overridden through the environment; unset or
/// unparsable variables fall back to the defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote product catalog
    pub catalog_base_url: String,
    /// Catalog request timeout in seconds
    pub catalog_timeout: u64,
    /// How long a settled query stays fresh, in milliseconds
    pub query_stale_time: u64,
    /// How long an unread query survives collection, in milliseconds
    pub query_gc_time: u64,
    /// Maximum number of cached queries
    pub query_max_entries: usize,
    /// Background garbage collection interval in seconds
    pub gc_interval: u64,
    /// What the cart does with quantities above stock
    pub cart_quantity_policy: QuantityPolicy,
    /// HTTP server port
    pub server_port: u16,
}

fn var_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Creates a Config from environment variables.
    ///
    /// # Environment Variables
    /// - `CATALOG_BASE_URL` - Catalog base URL (default: https://dummyjson.com)
    /// - `CATALOG_TIMEOUT` - Catalog request timeout in seconds (default: 10)
    /// - `QUERY_STALE_TIME` - Query freshness window in ms (default: 60000)
    /// - `QUERY_GC_TIME` - Idle query lifetime in ms (default: 300000)
    /// - `QUERY_MAX_ENTRIES` - Maximum cached queries (default: 1000)
    /// - `GC_INTERVAL` - Collection frequency in seconds (default: 30)
    /// - `CART_QUANTITY_POLICY` - `clamp` or `reject` (default: clamp)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            catalog_base_url: env::var("CATALOG_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.catalog_base_url),
            catalog_timeout: var_or("CATALOG_TIMEOUT", defaults.catalog_timeout),
            query_stale_time: var_or("QUERY_STALE_TIME", defaults.query_stale_time),
            query_gc_time: var_or("QUERY_GC_TIME", defaults.query_gc_time),
            query_max_entries: var_or("QUERY_MAX_ENTRIES", defaults.query_max_entries),
            gc_interval: var_or("GC_INTERVAL", defaults.gc_interval),
            cart_quantity_policy: var_or("CART_QUANTITY_POLICY", defaults.cart_quantity_policy),
            server_port: var_or("SERVER_PORT", defaults.server_port),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_base_url: "https://dummyjson.com".to_string(),
            catalog_timeout: 10,
            query_stale_time: 60_000,
            query_gc_time: 300_000,
            query_max_entries: 1000,
            gc_interval: 30,
            cart_quantity_policy: QuantityPolicy::Clamp,
            server_port: 3000,
        }
    }
}
