//! The cart: an ordered sequence of entries, unique by product ID.
//!
//! All mutation helpers are pure - they return a new [`Cart`] and leave the
//! receiver untouched. The store layer decides whether a candidate cart is
//! actually committed, so nothing here performs I/O or validation against
//! stock.
//!
//! Insertion order is preserved across mutations but carries no meaning.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Price, Product, ProductId};

/// One product/quantity pair within a cart.
///
/// Product metadata is denormalized from the catalog at the time the item was
/// first added; it is not refreshed on later mutations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    /// Catalog identifier of the product.
    pub product_id: ProductId,
    /// Display title captured at first add.
    pub title: String,
    /// Unit price captured at first add.
    pub price: Price,
    /// Primary image URL captured at first add.
    pub image_url: Option<String>,
    /// Selected quantity. Always positive.
    pub amount: i64,
}

impl CartEntry {
    /// Build the initial entry for a freshly added product (quantity one).
    #[must_use]
    pub fn first_of(product: Product) -> Self {
        Self {
            product_id: product.id,
            title: product.title,
            price: product.price,
            image_url: product.image_url,
            amount: 1,
        }
    }

    /// Price of the line (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.amount * Decimal::from(self.amount)
    }
}

/// The shopper's current selection of products and quantities.
///
/// Serializes transparently as a JSON array of entries; this is also the
/// persisted layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// All entries, in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the entry for a product, if present.
    #[must_use]
    pub fn entry(&self, product_id: ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.product_id == product_id)
    }

    /// Total quantity across all entries.
    #[must_use]
    pub fn total_quantity(&self) -> i64 {
        self.entries.iter().map(|e| e.amount).sum()
    }

    /// Sum of all line totals.
    ///
    /// Assumes a single-currency catalog; mixed currencies are summed
    /// numerically.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.entries
            .iter()
            .fold(Decimal::ZERO, |acc, e| acc + e.line_total())
    }

    /// A new cart with the matching entry's quantity incremented by one.
    ///
    /// If no entry matches, the result equals the receiver.
    #[must_use]
    pub fn with_incremented(&self, product_id: ProductId) -> Self {
        self.map_entry(product_id, |amount| amount + 1)
    }

    /// A new cart with the matching entry's quantity replaced.
    ///
    /// If no entry matches, the result equals the receiver.
    #[must_use]
    pub fn with_amount(&self, product_id: ProductId, amount: i64) -> Self {
        self.map_entry(product_id, |_| amount)
    }

    /// A new cart with the entry appended at the end.
    #[must_use]
    pub fn with_appended(&self, entry: CartEntry) -> Self {
        let mut entries = self.entries.clone();
        entries.push(entry);
        Self { entries }
    }

    /// A new cart with the matching entry excluded.
    ///
    /// If no entry matches, the result equals the receiver.
    #[must_use]
    pub fn without(&self, product_id: ProductId) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|e| e.product_id != product_id)
                .cloned()
                .collect(),
        }
    }

    fn map_entry(&self, product_id: ProductId, f: impl Fn(i64) -> i64) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|e| {
                    if e.product_id == product_id {
                        CartEntry {
                            amount: f(e.amount),
                            ..e.clone()
                        }
                    } else {
                        e.clone()
                    }
                })
                .collect(),
        }
    }
}
