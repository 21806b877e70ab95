//! Storage
//!
//! Durable key-value stores holding serialized cart snapshots.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Key the storefront has always kept its cart under.
pub const DEFAULT_CART_KEY: &str = "@RocketShoes:cart";

/// Errors that can occur when reading or writing a store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be read or written.
    #[error("storage io error")]
    Io(#[from] std::io::Error),

    /// The backing file holds something other than a string map.
    #[error("storage contents are not valid json")]
    Json(#[from] serde_json::Error),
}

/// A process-local store that survives restarts.
#[automock]
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
}
