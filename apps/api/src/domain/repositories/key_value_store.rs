use thiserror::Error;

/// Errors surfaced by key-value storage adapters
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("I/O error on key {key:?}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Synchronous string key-value storage
///
/// Models a browser-style local store: one string blob per key, no
/// transactions. Implementations should treat a missing key as `Ok(None)`
/// and removing a missing key as success.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
