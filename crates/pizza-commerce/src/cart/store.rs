//! Cart storage.
//!
//! The cart outlives any single ordering session, so the workflow never owns
//! line items directly: it reads, appends and clears through a [`CartStore`].

use std::sync::{Arc, RwLock};

use crate::cart::{Cart, CartLineItem};
use crate::error::CommerceError;

/// Storage for the shared cart.
pub trait CartStore: Send + Sync {
    /// All line items in insertion order.
    fn items(&self) -> Result<Vec<CartLineItem>, CommerceError>;

    /// Append a line item. Identical items are kept as separate entries.
    fn append(&self, item: CartLineItem) -> Result<(), CommerceError>;

    /// Remove every line item.
    fn clear(&self) -> Result<(), CommerceError>;

    fn len(&self) -> Result<usize, CommerceError> {
        Ok(self.items()?.len())
    }

    fn is_empty(&self) -> Result<bool, CommerceError> {
        Ok(self.len()? == 0)
    }

    /// Snapshot of the cart.
    fn snapshot(&self) -> Result<Cart, CommerceError> {
        Ok(Cart::from(self.items()?))
    }
}

/// In-process cart shared by every clone.
#[derive(Debug, Clone, Default)]
pub struct MemoryCartStore {
    items: Arc<RwLock<Vec<CartLineItem>>>,
}

impl MemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing line items.
    pub fn with_items(items: Vec<CartLineItem>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
        }
    }
}

fn poisoned<T>(_: T) -> CommerceError {
    CommerceError::CartStore("cart lock poisoned".to_string())
}

impl CartStore for MemoryCartStore {
    fn items(&self) -> Result<Vec<CartLineItem>, CommerceError> {
        Ok(self.items.read().map_err(poisoned)?.clone())
    }

    fn append(&self, item: CartLineItem) -> Result<(), CommerceError> {
        self.items.write().map_err(poisoned)?.push(item);
        Ok(())
    }

    fn clear(&self) -> Result<(), CommerceError> {
        self.items.write().map_err(poisoned)?.clear();
        Ok(())
    }

    fn len(&self) -> Result<usize, CommerceError> {
        Ok(self.items.read().map_err(poisoned)?.len())
    }
}
