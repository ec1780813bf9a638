//! Boundary Module
//!
//! Loading/error boundaries and the view node tree they produce.

mod composer;
mod node;

pub use composer::{default_fallback, wrap, Boundary, BoundaryOptions, BoundaryState, Fallback};
pub use node::{escape_html, Element, Node};
