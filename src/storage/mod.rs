pub mod json_store;

use thiserror::Error;

pub use json_store::JsonFileStore;

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Flat key-value persistence the ledger serializes into. Keys are logical
/// names; values are whole serialized documents, rewritten in full on every
/// mutation.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored document, or `None` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn put(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}
