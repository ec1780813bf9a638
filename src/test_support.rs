//! In-memory catalog and fixtures shared by unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::catalog::{Catalog, Money, PageRequest, Product, ProductCollection, ProductId};
use crate::error::{Result, StorefrontError};
use crate::pages::PageContext;
use crate::query::QueryClient;

pub(crate) struct StaticCatalog {
    products: HashMap<ProductId, Product>,
    order: Vec<ProductId>,
    calls: AtomicUsize,
    fail_collections: AtomicBool,
    gate: watch::Sender<bool>,
}

impl StaticCatalog {
    pub(crate) fn new(products: Vec<Product>) -> Self {
        Self {
            order: products.iter().map(|p| p.id).collect(),
            products: products.into_iter().map(|p| (p.id, p)).collect(),
            calls: AtomicUsize::new(0),
            fail_collections: AtomicBool::new(false),
            gate: watch::Sender::new(true),
        }
    }

    /// A catalog whose requests hang until [`open_gate`](Self::open_gate).
    pub(crate) fn gated(products: Vec<Product>) -> Self {
        let catalog = Self::new(products);
        catalog.gate.send_replace(false);
        catalog
    }

    pub(crate) fn open_gate(&self) {
        self.gate.send_replace(true);
    }

    async fn pass_gate(&self) {
        let mut gate = self.gate.subscribe();
        // Sender lives in self, so the channel cannot close while waiting
        let _ = gate.wait_for(|open| *open).await;
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn fail_collections(&self) {
        self.fail_collections.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Catalog for StaticCatalog {
    async fn get_product(&self, id: ProductId) -> Result<Product> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pass_gate().await;
        self.products
            .get(&id)
            .cloned()
            .ok_or(StorefrontError::NotFound(id))
    }

    async fn get_product_collection(&self, page: PageRequest) -> Result<ProductCollection> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pass_gate().await;
        if self.fail_collections.load(Ordering::SeqCst) {
            return Err(StorefrontError::Transport("HTTP 503".to_string()));
        }
        let skip = page.skip.unwrap_or(0) as usize;
        let limit = page.limit.unwrap_or(30) as usize;
        let products: Vec<Product> = self
            .order
            .iter()
            .skip(skip)
            .take(limit)
            .filter_map(|id| self.products.get(id).cloned())
            .collect();

        Ok(ProductCollection {
            products,
            total: self.order.len() as u64,
            skip: skip as u64,
            limit: limit as u64,
        })
    }
}

pub(crate) fn phone(id: u64, stock: u32) -> Product {
    Product {
        id: ProductId::new(id),
        title: "Smartphone X".to_string(),
        description: "Latest smartphone with advanced features".to_string(),
        price: Money::from_cents(79999),
        category: "smartphones".to_string(),
        rating: 4.5,
        stock,
        brand: Some("Acme".to_string()),
        availability_status: if stock > 0 { "In Stock" } else { "Out of Stock" }.to_string(),
        return_policy: "30 days return policy".to_string(),
        thumbnail: "https://example.com/thumb.jpg".to_string(),
        images: vec!["https://example.com/phone.jpg".to_string()],
    }
}

pub(crate) fn context(products: Vec<Product>) -> (PageContext, Arc<StaticCatalog>) {
    let catalog = Arc::new(StaticCatalog::new(products));
    let ctx = PageContext {
        queries: QueryClient::default(),
        catalog: catalog.clone(),
        cart_count: 0,
    };
    (ctx, catalog)
}
