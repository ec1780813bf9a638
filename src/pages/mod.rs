//! Pages Module
//!
//! Page orchestrators: each page reads its data through the query cache
//! inside a boundary and renders the layout once the read resolves.

mod index;
mod product;
pub mod sections;

use crate::boundary::{escape_html, BoundaryState, Node};
use crate::catalog::SharedCatalog;
use crate::error::StorefrontError;
use crate::query::QueryClient;

pub use index::{index_page, render_index, PRODUCTS_PLACEHOLDER};
pub use product::{product_page, render_product, PRODUCT_PLACEHOLDER};

// == Page Context ==
/// Per-request view of the session services a page needs.
#[derive(Clone)]
pub struct PageContext {
    pub queries: QueryClient,
    pub catalog: SharedCatalog,
    /// Item count shown in the header
    pub cart_count: u64,
}

// == Rendered Page ==
/// A page body together with the state its boundary ended in.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub body: Node,
    pub state: BoundaryState,
}

impl RenderedPage {
    /// The error captured by the page boundary, if any.
    pub fn error(&self) -> Option<&StorefrontError> {
        match &self.state {
            BoundaryState::Error(error) => Some(error),
            _ => None,
        }
    }

    /// Full HTML document around the body.
    pub fn to_document(&self, title: &str) -> String {
        format!(
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{}</title></head><body>{}</body></html>",
            escape_html(title),
            self.body.to_html()
        )
    }
}
