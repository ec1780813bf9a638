//! Error types for the storefront
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::catalog::ProductId;
use crate::models::ErrorResponse;

// == Storefront Error Enum ==
/// Unified error type for the storefront.
///
/// `Clone` so that a single fetch outcome can be handed to every reader
/// waiting on the same query key.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorefrontError {
    /// The catalog reported no product with this id
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// Network failure, 5xx, or a payload that does not match the product shape
    #[error("Catalog request failed: {0}")]
    Transport(String),

    /// Non-positive quantity passed to the update path
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Cart operation references a product the cart does not hold
    #[error("Product {0} is not in the cart")]
    StaleReference(ProductId),

    /// Requested quantity is above the known stock and the cart rejects overflow
    #[error("Requested {requested} of product {product_id}, only {available} in stock")]
    ExceedsStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// Product has no stock left and cannot be added
    #[error("Product {0} is out of stock")]
    OutOfStock(ProductId),

    /// Route parameter is not a positive integer
    #[error("Invalid product id: {0}")]
    InvalidProductId(String),

    /// Request body that does not decode into the expected shape
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl StorefrontError {
    /// HTTP status used for both JSON errors and failed pages.
    pub fn status_code(&self) -> StatusCode {
        match self {
            StorefrontError::NotFound(_) => StatusCode::NOT_FOUND,
            StorefrontError::Transport(_) => StatusCode::BAD_GATEWAY,
            StorefrontError::InvalidQuantity(_)
            | StorefrontError::InvalidProductId(_)
            | StorefrontError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            StorefrontError::StaleReference(_)
            | StorefrontError::ExceedsStock { .. }
            | StorefrontError::OutOfStock(_) => StatusCode::CONFLICT,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for StorefrontError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the storefront.
pub type Result<T> = std::result::Result<T, StorefrontError>;
