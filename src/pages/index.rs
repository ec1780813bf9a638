//! Index Page: the featured product grid.

use crate::boundary::{Boundary, BoundaryOptions, Element, Node};
use crate::catalog::PageRequest;
use crate::pages::{sections, PageContext, RenderedPage};
use crate::query::Interrupt;

pub const PRODUCTS_PLACEHOLDER: &str = "Loading products...";

/// One render pass of the index page.
pub fn render_index(ctx: &PageContext, page: PageRequest) -> Result<Node, Interrupt> {
    let collection = ctx.queries.products(&ctx.catalog, page)?;

    let main = Node::fragment([
        Element::new("h1").text("Featured Products").into(),
        sections::product_grid(&collection.products),
    ]);
    Ok(sections::layout(ctx.cart_count, main))
}

/// Renders the index page inside its boundary until the read settles.
pub async fn index_page(ctx: &PageContext, page: PageRequest) -> RenderedPage {
    let options = BoundaryOptions::new(Element::new("p").text(PRODUCTS_PLACEHOLDER));
    let mut boundary = Boundary::new(options);
    let body = boundary.resolve(|| render_index(ctx, page)).await;

    RenderedPage {
        body,
        state: boundary.state().clone(),
    }
}
