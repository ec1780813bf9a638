//! Product Module
//!
//! Fixed product shape with validation at the catalog boundary. Wire payloads
//! are decoded into loosely typed `Raw*` structs first and then checked, so a
//! malformed product surfaces as a transport failure instead of a panic later.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::Money;
use crate::error::{Result, StorefrontError};

// == Product Id ==
/// Positive numeric product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    /// Parses a route parameter into a positive product id.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().parse::<u64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(StorefrontError::InvalidProductId(raw.to_string())),
        }
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// == Product ==
/// A catalog product. Read-only snapshot of what the catalog returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: Money,
    pub category: String,
    pub rating: f64,
    pub stock: u32,
    pub brand: Option<String>,
    pub availability_status: String,
    pub return_policy: String,
    pub thumbnail: String,
    pub images: Vec<String>,
}

impl Product {
    /// A product with no stock left cannot be purchased.
    pub fn is_purchasable(&self) -> bool {
        self.stock > 0
    }
}

// == Page Request ==
/// Paging parameters for a product collection. `None` defers to the
/// catalog's own default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub limit: Option<u32>,
    pub skip: Option<u32>,
}

impl PageRequest {
    pub fn new(limit: Option<u32>, skip: Option<u32>) -> Self {
        Self { limit, skip }
    }
}

// == Product Collection ==
/// One page of products plus the catalog-wide total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCollection {
    pub products: Vec<Product>,
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

// == Wire Types ==
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawProduct {
    id: i64,
    title: String,
    #[serde(default)]
    description: String,
    price: f64,
    #[serde(default)]
    category: String,
    #[serde(default)]
    rating: f64,
    stock: i64,
    #[serde(default)]
    brand: Option<String>,
    #[serde(default)]
    availability_status: String,
    #[serde(default)]
    return_policy: String,
    #[serde(default)]
    thumbnail: String,
    #[serde(default)]
    images: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawProductCollection {
    products: Vec<RawProduct>,
    total: i64,
    #[serde(default)]
    skip: i64,
    #[serde(default)]
    limit: i64,
}

fn malformed(what: impl fmt::Display) -> StorefrontError {
    StorefrontError::Transport(format!("malformed catalog payload: {}", what))
}

impl TryFrom<RawProduct> for Product {
    type Error = StorefrontError;

    fn try_from(raw: RawProduct) -> Result<Self> {
        let id = u64::try_from(raw.id)
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| malformed(format!("product id {}", raw.id)))?;
        let price = Money::from_decimal(raw.price)
            .ok_or_else(|| malformed(format!("price {} for product {}", raw.price, id)))?;
        let stock = u32::try_from(raw.stock)
            .map_err(|_| malformed(format!("stock {} for product {}", raw.stock, id)))?;
        if !raw.rating.is_finite() {
            return Err(malformed(format!("rating for product {}", id)));
        }

        Ok(Self {
            id: ProductId::new(id),
            title: raw.title,
            description: raw.description,
            price,
            category: raw.category,
            rating: raw.rating,
            stock,
            brand: raw.brand,
            availability_status: raw.availability_status,
            return_policy: raw.return_policy,
            thumbnail: raw.thumbnail,
            images: raw.images,
        })
    }
}

impl TryFrom<RawProductCollection> for ProductCollection {
    type Error = StorefrontError;

    fn try_from(raw: RawProductCollection) -> Result<Self> {
        let total = u64::try_from(raw.total).map_err(|_| malformed("negative total"))?;
        let products = raw
            .products
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            products,
            total,
            skip: u64::try_from(raw.skip).unwrap_or(0),
            limit: u64::try_from(raw.limit).unwrap_or(0),
        })
    }
}

/// Decodes and validates a single product payload.
pub(crate) fn decode_product(bytes: &[u8]) -> Result<Product> {
    let raw: RawProduct = serde_json::from_slice(bytes).map_err(malformed)?;
    Product::try_from(raw)
}

/// Decodes and validates a product collection payload.
pub(crate) fn decode_collection(bytes: &[u8]) -> Result<ProductCollection> {
    let raw: RawProductCollection = serde_json::from_slice(bytes).map_err(malformed)?;
    ProductCollection::try_from(raw)
}
