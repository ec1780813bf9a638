//! Catalog Client
//!
//! Read-only adapter over the remote product catalog. It performs one HTTP
//! call per request: caching and refetching belong to the query layer.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::catalog::product::{decode_collection, decode_product};
use crate::catalog::{PageRequest, Product, ProductCollection, ProductId};
use crate::config::Config;
use crate::error::{Result, StorefrontError};

// == Catalog Trait ==
/// Source of product data.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetches a single product by id.
    async fn get_product(&self, id: ProductId) -> Result<Product>;

    /// Fetches one page of the product collection.
    async fn get_product_collection(&self, page: PageRequest) -> Result<ProductCollection>;
}

/// Shared handle to a catalog implementation.
pub type SharedCatalog = Arc<dyn Catalog>;

// == HTTP Catalog ==
/// Catalog backed by a DummyJSON-style REST service.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    /// Creates a client for `base_url` with a per-request deadline.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                StorefrontError::Transport(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client from the loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.catalog_base_url.clone(),
            Duration::from_secs(config.catalog_timeout),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_bytes(&self, request: reqwest::RequestBuilder) -> Result<(StatusCode, Vec<u8>)> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "catalog request failed");
            StorefrontError::Transport(e.to_string())
        })?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| StorefrontError::Transport(e.to_string()))?;
        Ok((status, body.to_vec()))
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    async fn get_product(&self, id: ProductId) -> Result<Product> {
        let url = format!("{}/products/{}", self.base_url, id);
        debug!(%url, "fetching product");

        let (status, body) = self.fetch_bytes(self.client.get(&url)).await?;
        debug!(%status, product_id = %id, "product response received");

        match status {
            s if s.is_success() => decode_product(&body),
            StatusCode::NOT_FOUND => Err(StorefrontError::NotFound(id)),
            s => Err(StorefrontError::Transport(format!(
                "catalog returned {} for product {}",
                s, id
            ))),
        }
    }

    async fn get_product_collection(&self, page: PageRequest) -> Result<ProductCollection> {
        let url = format!("{}/products", self.base_url);
        let mut query: Vec<(&str, u32)> = Vec::with_capacity(2);
        if let Some(limit) = page.limit {
            query.push(("limit", limit));
        }
        if let Some(skip) = page.skip {
            query.push(("skip", skip));
        }
        debug!(%url, limit = ?page.limit, skip = ?page.skip, "fetching product collection");

        let mut request = self.client.get(&url);
        if !query.is_empty() {
            request = request.query(&query);
        }
        let (status, body) = self.fetch_bytes(request).await?;
        debug!(%status, "product collection response received");

        if status.is_success() {
            decode_collection(&body)
        } else {
            Err(StorefrontError::Transport(format!(
                "catalog returned {} for product collection",
                status
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn product_body(id: u64, stock: u64) -> serde_json::Value {
        json!({
            "id": id,
            "title": "Smartphone X",
            "description": "Latest smartphone with advanced features",
            "price": 799.99,
            "category": "smartphones",
            "rating": 4.5,
            "stock": stock,
            "brand": "TechBrand",
            "availabilityStatus": "In Stock",
            "returnPolicy": "30 days return policy",
            "thumbnail": "https://example.com/phone.jpg",
            "images": ["https://example.com/phone.jpg"]
        })
    }

    fn test_catalog(server: &MockServer) -> HttpCatalog {
        HttpCatalog::new(server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_get_product_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(product_body(1, 25)))
            .expect(1)
            .mount(&server)
            .await;

        let product = test_catalog(&server)
            .get_product(ProductId::new(1))
            .await
            .unwrap();
        assert_eq!(product.title, "Smartphone X");
        assert_eq!(product.stock, 25);
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/999"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({"message": "Product with id '999' not found"})),
            )
            .mount(&server)
            .await;

        let result = test_catalog(&server).get_product(ProductId::new(999)).await;
        assert_eq!(result, Err(StorefrontError::NotFound(ProductId::new(999))));
    }

    #[tokio::test]
    async fn test_get_product_server_error_is_transport() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/1"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = test_catalog(&server).get_product(ProductId::new(1)).await;
        assert!(matches!(result, Err(StorefrontError::Transport(_))));
    }

    #[tokio::test]
    async fn test_get_product_malformed_payload_is_transport() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
            .mount(&server)
            .await;

        let result = test_catalog(&server).get_product(ProductId::new(1)).await;
        assert!(matches!(result, Err(StorefrontError::Transport(_))));
    }

    #[tokio::test]
    async fn test_unreachable_catalog_is_transport() {
        let catalog = HttpCatalog::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();

        let result = catalog.get_product(ProductId::new(1)).await;
        assert!(matches!(result, Err(StorefrontError::Transport(_))));
    }

    #[tokio::test]
    async fn test_get_collection_passes_paging() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .and(query_param("limit", "10"))
            .and(query_param("skip", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "products": [product_body(21, 3)],
                "total": 194,
                "skip": 20,
                "limit": 10
            })))
            .expect(1)
            .mount(&server)
            .await;

        let collection = test_catalog(&server)
            .get_product_collection(PageRequest::new(Some(10), Some(20)))
            .await
            .unwrap();
        assert_eq!(collection.products[0].id, ProductId::new(21));
        assert_eq!(collection.total, 194);
        assert_eq!(collection.skip, 20);
    }

    #[tokio::test]
    async fn test_get_collection_default_paging() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "products": [],
                "total": 0,
                "skip": 0,
                "limit": 30
            })))
            .mount(&server)
            .await;

        let collection = test_catalog(&server)
            .get_product_collection(PageRequest::default())
            .await
            .unwrap();
        assert!(collection.products.is_empty());

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), None);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let catalog = HttpCatalog::new("https://dummyjson.com/", Duration::from_secs(1)).unwrap();
        assert_eq!(catalog.base_url(), "https://dummyjson.com");
    }
}
