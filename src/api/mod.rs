//! API Module
//!
//! HTTP handlers and routing for the storefront.
//!
//! # Endpoints
//! - `GET /` - Index Page
//! - `GET /products/:product_id` - Product Page
//! - `GET /cart` - Cart contents
//! - `POST /cart/items/:product_id` - Add one unit
//! - `PUT /cart/items/:product_id` - Set the quantity
//! - `DELETE /cart/items/:product_id` - Remove the line item
//! - `GET /stats` - Query cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
