//! Key-value persistence adapter
//!
//! The auth state only needs two calls from its backing store: read one
//! string by key and overwrite one string by key. Both may fail.

use async_trait::async_trait;

use crate::error::Result;

pub mod memory;

pub use memory::MemoryStore;

/// Asynchronous string key-value store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` if it was never written
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
