//! Key-value media the persistence adapter can write through.

pub mod file;
pub mod memory;

/// Failure writing to a medium. Reads never fail: an unreadable value is
/// reported as absent.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// A string-keyed, string-valued store with last-write-wins semantics.
///
/// Implementations must be safe to share across tasks; no cross-process
/// locking is expected.
pub trait KeyValueStore: Send + Sync {
    /// Raw value stored under `key`, or `None` when absent or unreadable.
    fn get(&self, key: &str) -> Option<String>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
