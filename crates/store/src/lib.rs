//! Shopcart Store - the cart state manager.
//!
//! # Architecture
//!
//! [`CartStore`] owns the single authoritative in-memory cart. Every mutation
//! is validated against remotely fetched stock, written through to a
//! persistent store on success, and reported to the user via a notifier on
//! failure. The three collaborators sit behind traits so the composition
//! root decides what backs them:
//!
//! - [`CatalogService`] - product metadata and stock lookups
//!   ([`HttpCatalogClient`] in production)
//! - [`PersistentStore`] - whole-blob read/write of the serialized cart
//!   ([`JsonFileStore`] in production)
//! - [`Notifier`] - fire-and-forget user-facing error messages
//!   ([`TracingNotifier`] when no UI is attached)
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shopcart_core::ProductId;
//! use shopcart_store::{CartStore, HttpCatalogClient, JsonFileStore, StoreConfig, TracingNotifier};
//!
//! let config = StoreConfig::from_env()?;
//! let catalog = Arc::new(HttpCatalogClient::new(&config)?);
//! let storage = Arc::new(JsonFileStore::new(&config.data_dir));
//! let notifier = Arc::new(TracingNotifier);
//!
//! let mut store = CartStore::restore(catalog, storage, notifier).await;
//! store.add_product(ProductId::new(1)).await;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod catalog;
mod config;
mod error;
mod notify;
mod ports;
mod storage;
mod store;

pub use catalog::HttpCatalogClient;
pub use config::{ConfigError, StoreConfig};
pub use error::{CartError, CatalogError, StorageError};
pub use notify::TracingNotifier;
pub use ports::{CatalogService, Notifier, PersistentStore};
pub use storage::JsonFileStore;
pub use store::{
    CART_STORAGE_KEY, CartStore, MSG_ADD_FAILED, MSG_OUT_OF_STOCK, MSG_REMOVE_FAILED,
    MSG_UPDATE_FAILED,
};
