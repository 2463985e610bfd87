//! Collaborator traits consumed by the cart store.
//!
//! The store never implements these itself; the composition root injects
//! them. All are object-safe so they can be shared as `Arc<dyn _>`.

use async_trait::async_trait;

use shopcart_core::{Product, ProductId, StockLevel};

use crate::error::{CatalogError, StorageError};

/// Read-only access to the product catalog.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Fetch product metadata by ID.
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError>;

    /// Fetch the current stock level for a product.
    ///
    /// Implementations must not serve stale data here: stock is consulted at
    /// mutation time to validate quantities.
    async fn get_stock(&self, id: ProductId) -> Result<StockLevel, CatalogError>;
}

/// Whole-blob persistent key-value storage for the serialized cart.
#[async_trait]
pub trait PersistentStore: Send + Sync {
    /// Read the blob stored under `key`, if any.
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the blob stored under `key`.
    async fn write(&self, key: &str, blob: &str) -> Result<(), StorageError>;
}

/// Fire-and-forget user-facing error messages.
pub trait Notifier: Send + Sync {
    /// Surface an error message to the user. No return value is observed.
    fn error(&self, message: &str);
}
