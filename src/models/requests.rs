//! Request DTOs for the storefront API

use serde::Deserialize;

use crate::catalog::PageRequest;

/// Query string of the index page (`GET /?limit=&skip=`)
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub skip: Option<u32>,
}

impl From<PageParams> for PageRequest {
    fn from(params: PageParams) -> Self {
        PageRequest::new(params.limit, params.skip)
    }
}

/// Request body for `PUT /cart/items/:product_id`
///
/// Signed so that zero and negative quantities reach the cart and are
/// rejected there rather than failing deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i64,
}
