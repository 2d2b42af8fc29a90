//! Product domain: the record type and its storage

mod model;
mod store;

pub use model::Product;
pub use store::{MemoryStore, ProductStore, StoreError};
