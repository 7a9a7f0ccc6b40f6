//! Traits used at the boundary with the persistent storage medium

use async_trait::async_trait;

use crate::error::StoreError;

/// An asynchronous key/value medium, that stores string values under string keys.
///
/// Implementors only have to guarantee that a single `set` is atomic: a concurrent `get` returns
/// either the previous value or the new one, never a mix of both.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if nothing has ever been stored there
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`
    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Remove the value stored under `key`. Removing a key that does not exist is not an error
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}
