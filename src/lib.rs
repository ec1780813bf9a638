//! Storefront - product listing, product pages and a cart over a remote catalog
//!
//! Pages read through a suspending query cache inside loading/error
//! boundaries; the cart keeps ordered line items with derived totals.

pub mod api;
pub mod boundary;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod pages;
pub mod query;
pub mod tasks;

#[cfg(test)]
mod test_support;

pub use api::{create_router, AppState};
pub use config::Config;
pub use error::{Result, StorefrontError};
pub use tasks::spawn_gc_task;
