//! Persistence and observer behavior: the persisted blob mirrors the
//! in-memory cart after every successful mutation and only then.

use std::sync::{Arc, Mutex};

use shopcart_core::{Cart, ProductId};
use shopcart_integration_tests::{FakeCatalog, MemoryStore, RecordingNotifier, product};
use shopcart_store::{
    CART_STORAGE_KEY, CartStore, CatalogService, MSG_REMOVE_FAILED, Notifier, PersistentStore,
};

async fn harness() -> (
    CartStore,
    Arc<FakeCatalog>,
    Arc<MemoryStore>,
    Arc<RecordingNotifier>,
) {
    let catalog = Arc::new(FakeCatalog::new());
    let storage = Arc::new(MemoryStore::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let store = CartStore::restore(
        Arc::clone(&catalog) as Arc<dyn CatalogService>,
        Arc::clone(&storage) as Arc<dyn PersistentStore>,
        Arc::clone(&notifier) as Arc<dyn Notifier>,
    )
    .await;
    (store, catalog, storage, notifier)
}

fn persisted_cart(storage: &MemoryStore) -> Option<Cart> {
    storage
        .blob(CART_STORAGE_KEY)
        .map(|blob| serde_json::from_str(&blob).expect("persisted blob must parse"))
}

// =============================================================================
// Write-through
// =============================================================================

#[tokio::test]
async fn test_persisted_blob_matches_memory_after_each_mutation() {
    let (mut store, catalog, storage, _notifier) = harness().await;
    catalog.insert(product(1, "Sneaker", 8990), 5);
    catalog.insert(product(2, "Sandal", 4990), 5);

    store.add_product(ProductId::new(1)).await;
    assert_eq!(persisted_cart(&storage).as_ref(), Some(store.cart()));

    store.add_product(ProductId::new(2)).await;
    assert_eq!(persisted_cart(&storage).as_ref(), Some(store.cart()));

    store.update_product_amount(ProductId::new(1), 4).await;
    assert_eq!(persisted_cart(&storage).as_ref(), Some(store.cart()));

    store.remove_product(ProductId::new(2)).await;
    assert_eq!(persisted_cart(&storage).as_ref(), Some(store.cart()));
}

#[tokio::test]
async fn test_rejected_mutation_does_not_touch_storage() {
    let (mut store, catalog, storage, _notifier) = harness().await;
    catalog.insert(product(1, "Sneaker", 8990), 1);
    store.add_product(ProductId::new(1)).await;
    let blob_before = storage.blob(CART_STORAGE_KEY);
    let writes_before = storage.write_count();

    // stock is 1, incrementing to 2 is rejected
    store.add_product(ProductId::new(1)).await;
    // and so is updating beyond stock
    store.update_product_amount(ProductId::new(1), 10).await;

    assert_eq!(storage.blob(CART_STORAGE_KEY), blob_before);
    assert_eq!(storage.write_count(), writes_before);
}

#[tokio::test]
async fn test_collaborator_failure_does_not_touch_storage() {
    let (mut store, catalog, storage, _notifier) = harness().await;
    catalog.insert(product(1, "Sneaker", 8990), 5);
    store.add_product(ProductId::new(1)).await;
    let blob_before = storage.blob(CART_STORAGE_KEY);

    catalog.fail_stock(true);
    store.add_product(ProductId::new(1)).await;
    store.update_product_amount(ProductId::new(1), 3).await;

    assert_eq!(storage.blob(CART_STORAGE_KEY), blob_before);
    assert_eq!(store.cart().entries()[0].amount, 1);
}

#[tokio::test]
async fn test_failed_write_leaves_memory_at_pre_call_state() {
    let (mut store, catalog, storage, notifier) = harness().await;
    catalog.insert(product(1, "Sneaker", 8990), 5);
    store.add_product(ProductId::new(1)).await;
    let cart_before = store.cart().clone();

    storage.fail_writes(true);
    store.remove_product(ProductId::new(1)).await;

    assert_eq!(store.cart(), &cart_before);
    assert_eq!(notifier.messages(), vec![MSG_REMOVE_FAILED]);
}

// =============================================================================
// Restore
// =============================================================================

#[tokio::test]
async fn test_restore_reconstructs_previous_session() {
    let (mut store, catalog, storage, _notifier) = harness().await;
    catalog.insert(product(1, "Sneaker", 8990), 5);
    store.add_product(ProductId::new(1)).await;
    store.add_product(ProductId::new(1)).await;
    let cart_before = store.cart().clone();
    drop(store);

    // next session: same storage, fresh store
    let revived = CartStore::restore(
        Arc::clone(&catalog) as Arc<dyn CatalogService>,
        Arc::clone(&storage) as Arc<dyn PersistentStore>,
        Arc::new(RecordingNotifier::new()),
    )
    .await;

    assert_eq!(revived.cart(), &cart_before);
}

#[tokio::test]
async fn test_restore_defaults_to_empty_without_blob() {
    let (store, _catalog, _storage, notifier) = harness().await;
    assert!(store.cart().is_empty());
    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn test_restore_defaults_to_empty_on_unparsable_blob() {
    let catalog = Arc::new(FakeCatalog::new());
    let storage = Arc::new(MemoryStore::new());
    storage.seed(CART_STORAGE_KEY, "{ definitely not a cart");
    let notifier = Arc::new(RecordingNotifier::new());

    let store = CartStore::restore(
        catalog as Arc<dyn CatalogService>,
        Arc::clone(&storage) as Arc<dyn PersistentStore>,
        Arc::clone(&notifier) as Arc<dyn Notifier>,
    )
    .await;

    assert!(store.cart().is_empty());
    // a bad blob is a restore fallback, not a user-facing error
    assert!(notifier.messages().is_empty());
}

// =============================================================================
// Observer
// =============================================================================

#[tokio::test]
async fn test_subscribers_see_every_successful_commit() {
    let (mut store, catalog, _storage, _notifier) = harness().await;
    catalog.insert(product(1, "Sneaker", 8990), 5);

    let seen: Arc<Mutex<Vec<i64>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    store.subscribe(move |cart| {
        sink.lock().expect("lock poisoned").push(cart.total_quantity());
    });

    store.add_product(ProductId::new(1)).await;
    store.update_product_amount(ProductId::new(1), 4).await;
    // rejected: beyond stock, no callback
    store.update_product_amount(ProductId::new(1), 9).await;
    store.remove_product(ProductId::new(1)).await;

    assert_eq!(*seen.lock().expect("lock poisoned"), vec![1, 4, 0]);
}
