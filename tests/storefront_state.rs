use purple_dog_storefront::api::ApiClient;
use purple_dog_storefront::cart::{CartChange, CartStore, NewCartItem};
use purple_dog_storefront::config::StoreConfig;
use purple_dog_storefront::error::StoreError;
use purple_dog_storefront::session::{SessionContext, UserRole};
use purple_dog_storefront::storage::{
    self, FileStore, LocalStore, MemoryStore, KEY_TOKEN, KEY_USER, KEY_USER_TYPE,
};
use std::sync::Arc;

fn listing(product_id: i64, title: &str, price: f64) -> NewCartItem {
    NewCartItem {
        product_id,
        title: title.to_string(),
        unit_price: price,
        image_url: None,
        seller_id: 301,
        condition: "Good".to_string(),
        category_label: "Furniture".to_string(),
    }
}

/// Adding a product twice is rejected; the cart never holds duplicates.
#[tokio::test]
async fn duplicate_product_is_rejected() {
    let cart = CartStore::new(Arc::new(MemoryStore::new()));
    cart.add(listing(5, "Art deco lamp", 240.0)).unwrap();

    let err = cart.add(listing(5, "Art deco lamp", 240.0)).unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));

    let items = cart.items().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].product_id, 5);
}

/// A listing without a positive finite price never enters the cart.
#[tokio::test]
async fn non_positive_price_is_rejected() {
    let cart = CartStore::new(Arc::new(MemoryStore::new()));

    for bad_price in [0.0, -12.5, f64::NAN] {
        let err = cart.add(listing(6, "Mystery lot", bad_price)).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }
    assert_eq!(cart.count().unwrap(), 0);
}

/// Clear then add yields exactly the added item.
#[tokio::test]
async fn clear_then_add_leaves_a_single_item() {
    let cart = CartStore::new(Arc::new(MemoryStore::new()));
    cart.add(listing(1, "Signet ring", 450.0)).unwrap();
    cart.add(listing(2, "Oak dresser", 820.0)).unwrap();

    cart.clear().unwrap();
    assert_eq!(cart.count().unwrap(), 0);

    let added = cart.add(listing(3, "Bronze figure", 150.0)).unwrap();
    let items = cart.items().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, added.id);
    assert_eq!(items[0].product_id, 3);
}

/// Every mutation broadcasts before returning, with the post-mutation count.
#[tokio::test]
async fn mutations_broadcast_to_subscribers() {
    let cart = CartStore::new(Arc::new(MemoryStore::new()));
    let mut events = cart.subscribe();

    let item = cart.add(listing(1, "Signet ring", 450.0)).unwrap();
    let event = events.recv().await.unwrap();
    assert_eq!(event.change, CartChange::Added);
    assert_eq!(event.item_count, 1);

    cart.remove(&item.id).unwrap();
    let event = events.recv().await.unwrap();
    assert_eq!(event.change, CartChange::Removed);
    assert_eq!(event.item_count, 0);

    cart.clear().unwrap();
    let event = events.recv().await.unwrap();
    assert_eq!(event.change, CartChange::Cleared);
}

/// The cart survives a restart through the file-backed store.
#[tokio::test]
async fn cart_persists_across_store_instances() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = Arc::new(FileStore::new(dir.path()).unwrap());
        let cart = CartStore::new(store);
        cart.add(listing(8, "Pocket watch", 560.0)).unwrap();
    }

    let store = Arc::new(FileStore::new(dir.path()).unwrap());
    let cart = CartStore::new(store);
    let items = cart.items().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Pocket watch");
}

/// Removing an unknown id leaves the cart untouched.
#[tokio::test]
async fn removing_unknown_id_is_a_no_op() {
    let cart = CartStore::new(Arc::new(MemoryStore::new()));
    cart.add(listing(1, "Signet ring", 450.0)).unwrap();
    cart.remove("not-a-real-id").unwrap();
    assert_eq!(cart.count().unwrap(), 1);
}

/// Session loading: identity blob plus token, with legacy hints honored.
#[test]
fn session_loads_identity_and_legacy_hints() {
    let store = MemoryStore::new();
    storage::write_json(&store, KEY_TOKEN, &"bearer-abc".to_string()).unwrap();
    storage::write_json(
        &store,
        KEY_USER,
        &serde_json::json!({"id": 9, "display_name": "Galerie Dupont", "role": "PROFESSIONAL"}),
    )
    .unwrap();

    let session = SessionContext::load(&store).unwrap();
    assert!(session.is_authenticated());
    assert!(session.is_professional());
    assert_eq!(session.person_id(), Some(9));
    assert_eq!(
        session.identity.as_ref().unwrap().role,
        UserRole::Professional
    );

    // Identity missing entirely: the legacy hint decides the role check,
    // but the session is not authenticated.
    let store = MemoryStore::new();
    storage::write_json(&store, KEY_USER_TYPE, &"PROFESSIONAL".to_string()).unwrap();
    let session = SessionContext::load(&store).unwrap();
    assert!(!session.is_authenticated());
    assert!(session.is_professional());
}

/// The shared client builds from config + session without touching the network.
#[test]
fn api_client_builds_from_config_and_session() {
    let config = StoreConfig::default();
    let session = SessionContext::default();
    assert!(ApiClient::new(&config, &session).is_ok());
}

/// Blob reads return exactly what was last written, whole-blob semantics.
#[test]
fn file_store_round_trips_blobs() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path()).unwrap();

    assert!(store.read("cart").unwrap().is_none());

    let value = serde_json::json!([{"id": "1-5", "product_id": 5}]);
    store.write("cart", &value).unwrap();
    assert_eq!(store.read("cart").unwrap(), Some(value));

    store.remove("cart").unwrap();
    assert!(store.read("cart").unwrap().is_none());
}
