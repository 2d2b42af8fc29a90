//! Product storage
//!
//! The router only sees the [`ProductStore`] trait; the in-memory map is one
//! implementation, injected through `AppState` at startup.

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

use super::model::Product;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("product store lock poisoned")]
    Poisoned,
}

/// Keyed product storage shared by all connections
pub trait ProductStore: Send + Sync {
    /// Fetch the record stored under `id`
    fn get(&self, id: i32) -> Result<Option<Product>, StoreError>;

    /// Store `product` under `id`, replacing any previous record
    fn put(&self, id: i32, product: Product) -> Result<(), StoreError>;
}

/// In-memory product store
///
/// One lock guards the whole map, so a completed `put` is visible to every
/// `get` that starts after it.
pub struct MemoryStore {
    data: RwLock<HashMap<i32, Product>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductStore for MemoryStore {
    fn get(&self, id: i32) -> Result<Option<Product>, StoreError> {
        let data = self.data.read().map_err(|_| StoreError::Poisoned)?;
        Ok(data.get(&id).cloned())
    }

    fn put(&self, id: i32, product: Product) -> Result<(), StoreError> {
        let mut data = self.data.write().map_err(|_| StoreError::Poisoned)?;
        data.insert(id, product);
        Ok(())
    }
}
