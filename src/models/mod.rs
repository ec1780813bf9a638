//! Request and Response models for the storefront API
//!
//! DTOs for the JSON endpoints and query strings.

pub mod requests;
pub mod responses;

pub use requests::{PageParams, UpdateQuantityRequest};
pub use responses::{
    CartItemResponse, CartResponse, ErrorResponse, HealthResponse, StatsResponse,
};
