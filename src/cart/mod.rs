/// Client-local shopping cart.
/// 1. Unique-item collection (no quantities), at most one entry per product
/// 2. Whole-blob persistence through the local store on every mutation
/// 3. Synchronous change broadcast so subscribers see post-mutation state
// region:    --- Imports
use crate::error::{Result, StoreError};
use crate::storage::{self, LocalStore, KEY_CART};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::info;

// endregion: --- Imports

// region:    --- Model

/// One listing in the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    /// Cart-local id, client-generated at add time.
    pub id: String,
    pub product_id: i64,
    pub title: String,
    pub unit_price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    pub seller_id: i64,
    pub condition: String,
    pub category_label: String,
}

/// Item data as supplied by the listing page; the cart assigns the id.
#[derive(Debug, Clone)]
pub struct NewCartItem {
    pub product_id: i64,
    pub title: String,
    pub unit_price: f64,
    pub image_url: Option<String>,
    pub seller_id: i64,
    pub condition: String,
    pub category_label: String,
}

/// What changed, sent with every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    Added,
    Removed,
    Cleared,
}

/// Broadcast payload: the change plus the post-mutation item count.
#[derive(Debug, Clone, Copy)]
pub struct CartEvent {
    pub change: CartChange,
    pub item_count: usize,
}

// endregion: --- Model

// region:    --- CartStore

const CHANGE_CHANNEL_CAPACITY: usize = 16;

/// The one cross-screen shared mutable resource. All cart mutations go
/// through this service; views never touch the persisted blob directly.
pub struct CartStore {
    store: Arc<dyn LocalStore>,
    changes: broadcast::Sender<CartEvent>,
}

impl CartStore {
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self { store, changes }
    }

    /// Current cart contents; an unwritten blob reads as an empty cart.
    pub fn items(&self) -> Result<Vec<CartItem>> {
        Ok(storage::read_json(self.store.as_ref(), KEY_CART)?.unwrap_or_default())
    }

    /// Number of items currently in the cart.
    pub fn count(&self) -> Result<usize> {
        Ok(self.items()?.len())
    }

    /// Sum of item prices.
    pub fn total_price(&self) -> Result<f64> {
        Ok(self.items()?.iter().map(|item| item.unit_price).sum())
    }

    /// Add a listing. Rejects a product that is already in the cart and
    /// any listing without a positive price.
    pub fn add(&self, new_item: NewCartItem) -> Result<CartItem> {
        if !new_item.unit_price.is_finite() || new_item.unit_price <= 0.0 {
            return Err(StoreError::Validation(format!(
                "\"{}\" has no valid price",
                new_item.title
            )));
        }
        let mut items = self.items()?;
        if items.iter().any(|item| item.product_id == new_item.product_id) {
            return Err(StoreError::Validation(format!(
                "\"{}\" is already in your cart",
                new_item.title
            )));
        }

        let item = CartItem {
            id: format!("{}-{}", Utc::now().timestamp_millis(), new_item.product_id),
            product_id: new_item.product_id,
            title: new_item.title,
            unit_price: new_item.unit_price,
            image_url: new_item.image_url,
            seller_id: new_item.seller_id,
            condition: new_item.condition,
            category_label: new_item.category_label,
        };
        items.push(item.clone());
        self.persist(&items)?;
        info!("{:<12} --> added product {}", "Cart", item.product_id);
        self.notify(CartChange::Added, items.len());
        Ok(item)
    }

    /// Remove an item by its cart-local id. Removing an absent id is a no-op.
    pub fn remove(&self, item_id: &str) -> Result<()> {
        let mut items = self.items()?;
        items.retain(|item| item.id != item_id);
        self.persist(&items)?;
        info!("{:<12} --> removed item {}", "Cart", item_id);
        self.notify(CartChange::Removed, items.len());
        Ok(())
    }

    /// Empty the cart; used after successful order creation.
    pub fn clear(&self) -> Result<()> {
        self.persist(&Vec::new())?;
        info!("{:<12} --> cleared", "Cart");
        self.notify(CartChange::Cleared, 0);
        Ok(())
    }

    /// Subscribe to cart changes (the `cartUpdated` broadcast).
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.changes.subscribe()
    }

    fn persist(&self, items: &Vec<CartItem>) -> Result<()> {
        storage::write_json(self.store.as_ref(), KEY_CART, items)
    }

    // A send with no live subscribers is not an error.
    fn notify(&self, change: CartChange, item_count: usize) {
        let _ = self.changes.send(CartEvent { change, item_count });
    }
}

// endregion: --- CartStore
