//! The cart store: authoritative in-memory cart plus mutation operations.
//!
//! Every public operation follows the same shape: compute a candidate cart,
//! validate it against freshly fetched stock, and commit on success. Failures
//! never reach the caller - they are absorbed and converted into a notifier
//! message, and neither the in-memory cart nor the persisted blob changes.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use shopcart_core::{Cart, CartEntry, ProductId};

use crate::error::{CartError, StorageError};
use crate::ports::{CatalogService, Notifier, PersistentStore};

/// Fixed storage key the serialized cart lives under.
pub const CART_STORAGE_KEY: &str = "shopcart.cart";

/// Notification shown when a requested quantity exceeds available stock.
pub const MSG_OUT_OF_STOCK: &str = "requested quantity out of stock";
/// Notification shown when adding a product fails.
pub const MSG_ADD_FAILED: &str = "error adding product";
/// Notification shown when removing a product fails.
pub const MSG_REMOVE_FAILED: &str = "error removing product";
/// Notification shown when changing a product quantity fails.
pub const MSG_UPDATE_FAILED: &str = "error changing product quantity";

type CommitHook = Box<dyn Fn(&Cart) + Send + Sync>;

/// Holds the authoritative in-memory cart and keeps a persistent mirror of it
/// in sync after every successful mutation.
///
/// Construct via [`CartStore::restore`], which rebuilds the cart from the
/// persistent store. Collaborators are injected; the store holds no other
/// mutable state.
pub struct CartStore {
    cart: Cart,
    catalog: Arc<dyn CatalogService>,
    storage: Arc<dyn PersistentStore>,
    notifier: Arc<dyn Notifier>,
    subscribers: Vec<CommitHook>,
}

impl CartStore {
    /// Build a store by restoring the cart from persistent storage.
    ///
    /// Falls back to an empty cart when the blob is absent, unreadable, or
    /// unparsable. Restore failures are a normal first-run condition and are
    /// only logged, never surfaced to the user.
    pub async fn restore(
        catalog: Arc<dyn CatalogService>,
        storage: Arc<dyn PersistentStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let cart = match storage.read(CART_STORAGE_KEY).await {
            Ok(Some(blob)) => serde_json::from_str(&blob).unwrap_or_else(|e| {
                debug!("discarding unparsable persisted cart: {e}");
                Cart::new()
            }),
            Ok(None) => Cart::new(),
            Err(e) => {
                debug!("could not read persisted cart, starting empty: {e}");
                Cart::new()
            }
        };

        Self {
            cart,
            catalog,
            storage,
            notifier,
            subscribers: Vec::new(),
        }
    }

    /// The current cart.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Register a callback invoked after every successful commit.
    ///
    /// Callbacks never fire on a rejected or failed mutation. This is the
    /// seam a UI hangs re-rendering off of.
    pub fn subscribe(&mut self, callback: impl Fn(&Cart) + Send + Sync + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    /// Add one unit of a product to the cart.
    ///
    /// A product already in the cart has its quantity incremented, subject to
    /// stock. A product not yet in the cart is appended with quantity one
    /// without a stock check - first add is intentionally unvalidated, only
    /// increments are.
    #[instrument(skip(self))]
    pub async fn add_product(&mut self, product_id: ProductId) {
        match self.try_add(product_id).await {
            Ok(()) => {}
            Err(CartError::OutOfStock) => {
                warn!(%product_id, "add rejected: insufficient stock");
                self.notifier.error(MSG_OUT_OF_STOCK);
            }
            Err(e) => {
                tracing::error!(%product_id, "add failed: {e}");
                self.notifier.error(MSG_ADD_FAILED);
            }
        }
    }

    async fn try_add(&mut self, product_id: ProductId) -> Result<(), CartError> {
        // Two independent reads; either failing aborts the whole operation.
        let product = self.catalog.get_product(product_id).await?;
        let stock = self.catalog.get_stock(product_id).await?;

        let next = match self.cart.entry(product_id) {
            Some(entry) => {
                if entry.amount + 1 <= stock.amount {
                    self.cart.with_incremented(product_id)
                } else {
                    return Err(CartError::OutOfStock);
                }
            }
            None => self.cart.with_appended(CartEntry::first_of(product)),
        };

        self.commit(next).await
    }

    /// Remove a product's entry from the cart.
    ///
    /// Removing a product that is not in the cart notifies a failure and
    /// leaves the cart unchanged; a second remove in a row is therefore a
    /// harmless no-op rejection.
    #[instrument(skip(self))]
    pub async fn remove_product(&mut self, product_id: ProductId) {
        match self.try_remove(product_id).await {
            Ok(()) => {}
            Err(CartError::NotInCart) => {
                warn!(%product_id, "remove rejected: not in cart");
                self.notifier.error(MSG_REMOVE_FAILED);
            }
            Err(e) => {
                tracing::error!(%product_id, "remove failed: {e}");
                self.notifier.error(MSG_REMOVE_FAILED);
            }
        }
    }

    async fn try_remove(&mut self, product_id: ProductId) -> Result<(), CartError> {
        if self.cart.entry(product_id).is_none() {
            return Err(CartError::NotInCart);
        }
        self.commit(self.cart.without(product_id)).await
    }

    /// Set a product's quantity to an absolute value.
    ///
    /// Non-positive amounts are silently ignored - removal goes through
    /// [`CartStore::remove_product`], not through this path.
    #[instrument(skip(self))]
    pub async fn update_product_amount(&mut self, product_id: ProductId, amount: i64) {
        if amount <= 0 {
            return;
        }

        match self.try_update(product_id, amount).await {
            Ok(()) => {}
            Err(CartError::OutOfStock) => {
                warn!(%product_id, amount, "update rejected: insufficient stock");
                self.notifier.error(MSG_OUT_OF_STOCK);
            }
            Err(e) => {
                tracing::error!(%product_id, amount, "update failed: {e}");
                self.notifier.error(MSG_UPDATE_FAILED);
            }
        }
    }

    async fn try_update(&mut self, product_id: ProductId, amount: i64) -> Result<(), CartError> {
        let stock = self.catalog.get_stock(product_id).await?;

        if amount <= stock.amount {
            // No presence check: an absent product leaves the mapped cart
            // identical and the commit writes an unchanged blob.
            self.commit(self.cart.with_amount(product_id, amount)).await
        } else {
            Err(CartError::OutOfStock)
        }
    }

    /// Apply a candidate cart: persist first, then replace the in-memory
    /// cart and invoke subscribers.
    ///
    /// Persist-first is the correctness invariant here: a failed write leaves
    /// both memory and storage at the pre-call state, so the persisted blob
    /// always deserializes to the current in-memory cart.
    async fn commit(&mut self, next: Cart) -> Result<(), CartError> {
        let blob = serde_json::to_string(&next).map_err(StorageError::Serialize)?;
        self.storage.write(CART_STORAGE_KEY, &blob).await?;

        self.cart = next;
        for subscriber in &self.subscribers {
            subscriber(&self.cart);
        }
        Ok(())
    }
}
