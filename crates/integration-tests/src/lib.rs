//! Integration test fixtures for Shopcart.
//!
//! Provides scriptable in-memory collaborators for driving a `CartStore`
//! without a catalog backend or a filesystem:
//!
//! - [`FakeCatalog`] - products and stock in hash maps, with failure
//!   injection and a stock-fetch counter
//! - [`MemoryStore`] - blob storage in a hash map, with a write-failure
//!   toggle and a write counter
//! - [`RecordingNotifier`] - collects every notification for assertion
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopcart-integration-tests
//! ```

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use rust_decimal::Decimal;

use shopcart_core::{CurrencyCode, Price, Product, ProductId, StockLevel};
use shopcart_store::{CatalogError, CatalogService, Notifier, PersistentStore, StorageError};

/// Build a product with a price given in cents.
#[must_use]
pub fn product(id: i64, title: &str, price_cents: i64) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        price: Price::new(Decimal::new(price_cents, 2), CurrencyCode::USD),
        image_url: None,
    }
}

/// Scriptable in-memory catalog.
#[derive(Default)]
pub struct FakeCatalog {
    products: Mutex<HashMap<ProductId, Product>>,
    stock: Mutex<HashMap<ProductId, i64>>,
    fail_products: AtomicBool,
    fail_stock: AtomicBool,
    stock_fetches: AtomicUsize,
}

impl FakeCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a product and its stock level.
    pub fn insert(&self, product: Product, stock: i64) {
        let id = product.id;
        self.products
            .lock()
            .expect("lock poisoned")
            .insert(id, product);
        self.stock.lock().expect("lock poisoned").insert(id, stock);
    }

    /// Replace the stock level for a product.
    pub fn set_stock(&self, id: ProductId, amount: i64) {
        self.stock.lock().expect("lock poisoned").insert(id, amount);
    }

    /// Make every product lookup fail with a server error.
    pub fn fail_products(&self, fail: bool) {
        self.fail_products.store(fail, Ordering::SeqCst);
    }

    /// Make every stock lookup fail with a server error.
    pub fn fail_stock(&self, fail: bool) {
        self.fail_stock.store(fail, Ordering::SeqCst);
    }

    /// Number of stock lookups observed so far.
    #[must_use]
    pub fn stock_fetches(&self) -> usize {
        self.stock_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogService for FakeCatalog {
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        if self.fail_products.load(Ordering::SeqCst) {
            return Err(CatalogError::Status(500));
        }
        self.products
            .lock()
            .expect("lock poisoned")
            .get(&id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    async fn get_stock(&self, id: ProductId) -> Result<StockLevel, CatalogError> {
        self.stock_fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_stock.load(Ordering::SeqCst) {
            return Err(CatalogError::Status(500));
        }
        self.stock
            .lock()
            .expect("lock poisoned")
            .get(&id)
            .map(|&amount| StockLevel { id, amount })
            .ok_or(CatalogError::NotFound(id))
    }
}

/// In-memory `PersistentStore` with failure injection.
#[derive(Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a blob, as if a previous session had persisted it.
    pub fn seed(&self, key: &str, blob: &str) {
        self.blobs
            .lock()
            .expect("lock poisoned")
            .insert(key.to_string(), blob.to_string());
    }

    /// The blob currently stored under `key`, if any.
    #[must_use]
    pub fn blob(&self, key: &str) -> Option<String> {
        self.blobs.lock().expect("lock poisoned").get(key).cloned()
    }

    /// Make every write fail with an I/O error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes observed so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PersistentStore for MemoryStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.blobs.lock().expect("lock poisoned").get(key).cloned())
    }

    async fn write(&self, key: &str, blob: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Io(std::io::Error::other("injected failure")));
        }
        self.blobs
            .lock()
            .expect("lock poisoned")
            .insert(key.to_string(), blob.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Notifier that records every message for later assertion.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages observed so far, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("lock poisoned").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.messages
            .lock()
            .expect("lock poisoned")
            .push(message.to_string());
    }
}
