//! Key-value store port
//!
//! Abstracts the platform's persistent key-value storage (the secure
//! store on device, a directory of files on desktop).

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during key-value store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error from the underlying storage.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key is not usable by this store.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Any other backend failure.
    #[error("{0}")]
    Backend(String),
}

/// Port for persistent string key-value storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails. A missing key is
    /// not an error.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails. Deleting a missing
    /// key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}
