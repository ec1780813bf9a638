//! Presentational sections shared by the pages.
//!
//! Pure functions of their inputs: no reads, no cart access.

use crate::boundary::{Element, Node};
use crate::catalog::Product;

pub const BACK_LINK_TEXT: &str = "← Back to Products";
pub const ADD_TO_CART: &str = "Add to Cart";
pub const OUT_OF_STOCK: &str = "Out of Stock";

// == Layout ==
pub fn header(cart_count: u64) -> Node {
    Element::new("header")
        .class("site-header")
        .child(Element::new("a").attr("href", "/").class("logo").text("Storefront"))
        .child(
            Element::new("a")
                .attr("href", "/cart")
                .class("cart-link")
                .text(format!("Cart ({})", cart_count)),
        )
        .into()
}

pub fn layout(cart_count: u64, main: Node) -> Node {
    Element::new("div")
        .class("layout")
        .child(header(cart_count))
        .child(Element::new("main").child(main))
        .into()
}

// == Index Sections ==
pub fn product_card(product: &Product) -> Node {
    let href = format!("/products/{}", product.id);
    Element::new("article")
        .class("product-card")
        .child(
            Element::new("a")
                .attr("href", href)
                .child(
                    Element::new("img")
                        .attr("src", product.thumbnail.as_str())
                        .attr("alt", product.title.as_str()),
                )
                .child(Element::new("h2").text(product.title.as_str())),
        )
        .child(Element::new("p").class("price").text(product.price.to_string()))
        .into()
}

pub fn product_grid<'a>(products: impl IntoIterator<Item = &'a Product>) -> Node {
    Element::new("div")
        .class("product-grid")
        .children(products.into_iter().map(product_card))
        .into()
}

// == Product Detail Sections ==
pub fn navigation() -> Node {
    Element::new("nav")
        .class("product-navigation")
        .child(Element::new("a").attr("href", "/").text(BACK_LINK_TEXT))
        .into()
}

pub fn product_image(product: &Product) -> Node {
    let src = product
        .images
        .first()
        .unwrap_or(&product.thumbnail)
        .as_str();
    Element::new("div")
        .class("product-image")
        .child(
            Element::new("img")
                .attr("src", src)
                .attr("alt", product.title.as_str()),
        )
        .into()
}

pub fn product_info(product: &Product) -> Node {
    Element::new("div")
        .class("product-info")
        .child(Element::new("h1").text(product.title.as_str()))
        .child(Element::new("p").class("price").text(product.price.to_string()))
        .child(Element::new("p").class("description").text(product.description.as_str()))
        .into()
}

pub fn product_meta(product: &Product) -> Node {
    let mut rows = vec![
        format!("Category: {}", product.category),
        format!("Rating: {:.1}", product.rating),
        format!("Stock: {}", product.stock),
    ];
    if let Some(brand) = &product.brand {
        rows.insert(1, format!("Brand: {}", brand));
    }
    if !product.availability_status.is_empty() {
        rows.push(format!("Availability: {}", product.availability_status));
    }
    if !product.return_policy.is_empty() {
        rows.push(format!("Returns: {}", product.return_policy));
    }

    Element::new("div")
        .class("product-meta")
        .children(rows.into_iter().map(|row| Element::new("p").text(row).into()))
        .into()
}

/// The add-to-cart control, disabled once stock runs out.
///
/// The enabled button submits a form posting to the cart endpoint.
pub fn product_actions(product: &Product) -> Node {
    let control: Node = if product.is_purchasable() {
        Element::new("form")
            .attr("method", "post")
            .attr("action", format!("/cart/items/{}", product.id))
            .child(Element::new("button").attr("type", "submit").text(ADD_TO_CART))
            .into()
    } else {
        Element::new("button")
            .attr("type", "button")
            .attr("disabled", "disabled")
            .text(OUT_OF_STOCK)
            .into()
    };

    Element::new("div")
        .class("product-actions")
        .child(control)
        .into()
}

pub fn product_detail(product: &Product) -> Node {
    Element::new("section")
        .class("product-detail")
        .child(navigation())
        .child(product_image(product))
        .child(product_info(product))
        .child(product_meta(product))
        .child(product_actions(product))
        .into()
}
