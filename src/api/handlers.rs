//! API Handlers
//!
//! HTML page handlers plus the JSON cart, stats and health endpoints.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::cart::CartStore;
use crate::catalog::{HttpCatalog, ProductId, SharedCatalog};
use crate::config::Config;
use crate::error::{Result, StorefrontError};
use crate::models::{CartResponse, HealthResponse, PageParams, StatsResponse, UpdateQuantityRequest};
use crate::pages::{index_page, product_page, PageContext, RenderedPage};
use crate::query::{QueryClient, QueryOptions};

const DOCUMENT_TITLE: &str = "Storefront";

/// Session services shared across all handlers.
///
/// Query cache and cart are built once and injected here; nothing in the
/// crate reaches for a global instance.
#[derive(Clone)]
pub struct AppState {
    pub queries: QueryClient,
    pub catalog: SharedCatalog,
    /// The cart is the only mutable shared resource; writers hold the lock
    /// for the whole mutation so readers never see a partial update
    pub cart: Arc<RwLock<CartStore>>,
}

impl AppState {
    pub fn new(queries: QueryClient, catalog: SharedCatalog, cart: CartStore) -> Self {
        Self {
            queries,
            catalog,
            cart: Arc::new(RwLock::new(cart)),
        }
    }

    /// Builds the HTTP catalog, query cache and cart from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let catalog: SharedCatalog = Arc::new(HttpCatalog::from_config(config)?);
        let queries = QueryClient::new(QueryOptions::from_config(config));
        let cart = CartStore::new(config.cart_quantity_policy);
        Ok(Self::new(queries, catalog, cart))
    }

    async fn page_context(&self) -> PageContext {
        PageContext {
            queries: self.queries.clone(),
            catalog: Arc::clone(&self.catalog),
            cart_count: self.cart.read().await.item_count(),
        }
    }
}

fn html_page(page: RenderedPage) -> Response {
    let status = page
        .error()
        .map(StorefrontError::status_code)
        .unwrap_or(StatusCode::OK);
    (status, Html(page.to_document(DOCUMENT_TITLE))).into_response()
}

/// Handler for GET /
///
/// Renders the Index Page for the requested page of the collection.
pub async fn index_handler(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Response {
    let ctx = state.page_context().await;
    html_page(index_page(&ctx, params.into()).await)
}

/// Handler for GET /products/:product_id
///
/// Invalid ids and unknown products render the page fallback with the
/// matching status code.
pub async fn product_handler(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Response {
    let ctx = state.page_context().await;
    html_page(product_page(&ctx, &product_id).await)
}

/// Handler for GET /cart
pub async fn get_cart_handler(State(state): State<AppState>) -> Json<CartResponse> {
    let cart = state.cart.read().await;
    Json(CartResponse::from_cart(&cart))
}

/// Handler for POST /cart/items/:product_id
///
/// Reads the product through the query cache and adds one unit. Products
/// without stock, or already held at their stock level, are refused here
/// before the cart is touched.
pub async fn add_item_handler(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<CartResponse>> {
    let id = ProductId::parse(&product_id)?;
    let product = state.queries.fetch_product(&state.catalog, id).await?;
    if !product.is_purchasable() {
        return Err(StorefrontError::OutOfStock(id));
    }

    let mut cart = state.cart.write().await;
    let held = cart.get(id).map_or(0, |item| item.quantity);
    if held >= product.stock {
        return Err(StorefrontError::ExceedsStock {
            product_id: id,
            requested: held.saturating_add(1),
            available: product.stock,
        });
    }
    cart.add_to_cart(&product);
    info!(product_id = %id, item_count = cart.item_count(), "added to cart");

    Ok(Json(CartResponse::from_cart(&cart)))
}

/// Handler for PUT /cart/items/:product_id
///
/// A body that does not decode is reported as `InvalidRequest`.
pub async fn update_item_handler(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    payload: std::result::Result<Json<UpdateQuantityRequest>, JsonRejection>,
) -> Result<Json<CartResponse>> {
    let id = ProductId::parse(&product_id)?;
    let Json(req) =
        payload.map_err(|rejection| StorefrontError::InvalidRequest(rejection.body_text()))?;

    let mut cart = state.cart.write().await;
    cart.update_quantity(id, req.quantity)?;

    Ok(Json(CartResponse::from_cart(&cart)))
}

/// Handler for DELETE /cart/items/:product_id
///
/// Removing a product that is not in the cart succeeds and changes nothing.
pub async fn remove_item_handler(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<CartResponse>> {
    let id = ProductId::parse(&product_id)?;

    let mut cart = state.cart.write().await;
    cart.remove_from_cart(id);

    Ok(Json(CartResponse::from_cart(&cart)))
}

/// Handler for GET /stats
///
/// Returns query cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.queries.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::QuantityPolicy;
    use crate::test_support::{phone, StaticCatalog};

    fn test_state(policy: QuantityPolicy) -> (AppState, Arc<StaticCatalog>) {
        let catalog = Arc::new(StaticCatalog::new(vec![phone(1, 25), phone(2, 0)]));
        let state = AppState::new(
            QueryClient::default(),
            catalog.clone(),
            CartStore::new(policy),
        );
        (state, catalog)
    }

    #[tokio::test]
    async fn test_add_twice_and_read_cart() {
        let (state, catalog) = test_state(QuantityPolicy::Clamp);

        add_item_handler(State(state.clone()), Path("1".to_string()))
            .await
            .unwrap();
        let response = add_item_handler(State(state.clone()), Path("1".to_string()))
            .await
            .unwrap();

        assert_eq!(response.item_count, 2);
        assert_eq!(response.total, "$1599.98");
        // Second add is served from the query cache
        assert_eq!(catalog.calls(), 1);

        let cart = get_cart_handler(State(state)).await;
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_add_out_of_stock_is_refused() {
        let (state, _) = test_state(QuantityPolicy::Clamp);

        let result = add_item_handler(State(state.clone()), Path("2".to_string())).await;
        assert_eq!(
            result.unwrap_err(),
            StorefrontError::OutOfStock(ProductId::new(2))
        );
        assert!(state.cart.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_add_unknown_product() {
        let (state, _) = test_state(QuantityPolicy::Clamp);

        let result = add_item_handler(State(state), Path("999".to_string())).await;
        assert_eq!(
            result.unwrap_err(),
            StorefrontError::NotFound(ProductId::new(999))
        );
    }

    #[tokio::test]
    async fn test_update_quantity_policies() {
        let (state, _) = test_state(QuantityPolicy::Clamp);
        add_item_handler(State(state.clone()), Path("1".to_string()))
            .await
            .unwrap();
        let response = update_item_handler(
            State(state),
            Path("1".to_string()),
            Ok(Json(UpdateQuantityRequest { quantity: 40 })),
        )
        .await
        .unwrap();
        assert_eq!(response.item_count, 25);

        let (state, _) = test_state(QuantityPolicy::Reject);
        add_item_handler(State(state.clone()), Path("1".to_string()))
            .await
            .unwrap();
        let result = update_item_handler(
            State(state),
            Path("1".to_string()),
            Ok(Json(UpdateQuantityRequest { quantity: 40 })),
        )
        .await;
        assert!(matches!(result, Err(StorefrontError::ExceedsStock { .. })));
    }

    #[tokio::test]
    async fn test_add_stops_at_stock() {
        let catalog = Arc::new(StaticCatalog::new(vec![phone(3, 2)]));
        for policy in [QuantityPolicy::Clamp, QuantityPolicy::Reject] {
            let state = AppState::new(
                QueryClient::default(),
                catalog.clone(),
                CartStore::new(policy),
            );

            for _ in 0..2 {
                add_item_handler(State(state.clone()), Path("3".to_string()))
                    .await
                    .unwrap();
            }
            let result = add_item_handler(State(state.clone()), Path("3".to_string())).await;
            assert_eq!(
                result.unwrap_err(),
                StorefrontError::ExceedsStock {
                    product_id: ProductId::new(3),
                    requested: 3,
                    available: 2,
                }
            );

            let cart = state.cart.read().await;
            assert_eq!(cart.get(ProductId::new(3)).unwrap().quantity, 2);
            assert_eq!(cart.item_count(), 2);
        }
    }

    #[tokio::test]
    async fn test_update_rejects_zero() {
        let (state, _) = test_state(QuantityPolicy::Clamp);
        add_item_handler(State(state.clone()), Path("1".to_string()))
            .await
            .unwrap();

        let result = update_item_handler(
            State(state),
            Path("1".to_string()),
            Ok(Json(UpdateQuantityRequest { quantity: 0 })),
        )
        .await;
        assert_eq!(result.unwrap_err(), StorefrontError::InvalidQuantity(0));
    }

    #[tokio::test]
    async fn test_remove_item_handler() {
        let (state, _) = test_state(QuantityPolicy::Clamp);
        add_item_handler(State(state.clone()), Path("1".to_string()))
            .await
            .unwrap();

        let response = remove_item_handler(State(state.clone()), Path("1".to_string()))
            .await
            .unwrap();
        assert_eq!(response.item_count, 0);
        assert_eq!(response.total_cents, 0);

        // Absent id is a no-op
        let response = remove_item_handler(State(state), Path("1".to_string()))
            .await
            .unwrap();
        assert!(response.items.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_path_id() {
        let (state, _) = test_state(QuantityPolicy::Clamp);

        let result = remove_item_handler(State(state), Path("-4".to_string())).await;
        assert_eq!(
            result.unwrap_err(),
            StorefrontError::InvalidProductId("-4".to_string())
        );
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let (state, _) = test_state(QuantityPolicy::Clamp);
        add_item_handler(State(state.clone()), Path("1".to_string()))
            .await
            .unwrap();

        let response = stats_handler(State(state)).await;
        assert_eq!(response.misses, 1);
        assert_eq!(response.fetches, 1);
        assert_eq!(response.total_entries, 1);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
