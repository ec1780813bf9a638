//! Product Page: detail view for the product named in the route.

use crate::boundary::{Boundary, BoundaryOptions, Element, Node};
use crate::catalog::ProductId;
use crate::pages::{sections, PageContext, RenderedPage};
use crate::query::Interrupt;

pub const PRODUCT_PLACEHOLDER: &str = "Loading product...";

/// One render pass of the product page for the raw route parameter.
///
/// An unparsable id fails the pass, so it lands in the boundary fallback
/// like any other render error.
pub fn render_product(ctx: &PageContext, raw_id: &str) -> Result<Node, Interrupt> {
    let id = ProductId::parse(raw_id)?;
    let product = ctx.queries.product(&ctx.catalog, id)?;

    Ok(sections::layout(ctx.cart_count, sections::product_detail(&product)))
}

/// Renders the product page inside its boundary until the read settles.
pub async fn product_page(ctx: &PageContext, raw_id: &str) -> RenderedPage {
    let options = BoundaryOptions::new(Element::new("p").text(PRODUCT_PLACEHOLDER));
    let mut boundary = Boundary::new(options);
    let body = boundary.resolve(|| render_product(ctx, raw_id)).await;

    RenderedPage {
        body,
        state: boundary.state().clone(),
    }
}
