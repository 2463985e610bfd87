//! Catalog-facing types: product metadata and stock levels.
//!
//! Both are read-only from the cart's perspective. Product metadata is
//! denormalized into the cart entry when an item is first added; stock levels
//! are fetched fresh on every mutation that checks them.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// Product metadata as served by the catalog backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: Price,
    /// Primary image URL, if the product has one.
    pub image_url: Option<String>,
}

/// Available stock for a product, as observed at fetch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    /// Catalog identifier.
    pub id: ProductId,
    /// Units currently available.
    pub amount: i64,
}
