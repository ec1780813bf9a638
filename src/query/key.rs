//! Query keys and cached values.

use std::fmt;
use std::sync::Arc;

use crate::catalog::{PageRequest, Product, ProductCollection, ProductId};
use crate::error::StorefrontError;

// == Query Key ==
/// Identity of a catalog query: operation kind plus its parameters.
///
/// Identical inputs always produce equal keys, which is what lets concurrent
/// readers share one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Product(ProductId),
    Products(PageRequest),
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn opt(value: Option<u32>) -> String {
            value.map_or_else(|| "default".to_string(), |v| v.to_string())
        }

        match self {
            QueryKey::Product(id) => write!(f, "product:{}", id),
            QueryKey::Products(page) => write!(
                f,
                "products:limit={},skip={}",
                opt(page.limit),
                opt(page.skip)
            ),
        }
    }
}

// == Query Value ==
/// A resolved query payload, shared between every reader.
#[derive(Debug, Clone)]
pub enum QueryValue {
    Product(Arc<Product>),
    Products(Arc<ProductCollection>),
}

/// Outcome of one fetch attempt.
pub type QueryOutcome = std::result::Result<QueryValue, StorefrontError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_display() {
        assert_eq!(QueryKey::Product(ProductId::new(1)).to_string(), "product:1");
        assert_eq!(
            QueryKey::Products(PageRequest::new(Some(10), None)).to_string(),
            "products:limit=10,skip=default"
        );
    }

    #[test]
    fn test_keys_from_same_inputs_are_equal() {
        let a = QueryKey::Products(PageRequest::new(Some(10), Some(0)));
        let b = QueryKey::Products(PageRequest::new(Some(10), Some(0)));
        let c = QueryKey::Products(PageRequest::new(Some(10), None));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
