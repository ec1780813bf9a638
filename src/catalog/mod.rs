//! Catalog Module
//!
//! Product model, money, and the remote catalog client.

mod client;
mod money;
mod product;

pub use client::{Catalog, HttpCatalog, SharedCatalog};
pub use money::Money;
pub use product::{PageRequest, Product, ProductCollection, ProductId};
