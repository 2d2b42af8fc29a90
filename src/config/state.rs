// Application state module
// Shared by every connection: configuration, the product store and counters

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use super::types::Config;
use crate::product::{MemoryStore, ProductStore};

/// Application state
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn ProductStore>,
    pub active_connections: Arc<AtomicUsize>,
}

impl AppState {
    /// Create `AppState` backed by an empty in-memory store
    pub fn new(config: &Config) -> Self {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    /// Create `AppState` around an existing store
    pub fn with_store(config: &Config, store: Arc<dyn ProductStore>) -> Self {
        Self {
            config: config.clone(),
            store,
            active_connections: Arc::new(AtomicUsize::new(0)),
        }
    }
}
