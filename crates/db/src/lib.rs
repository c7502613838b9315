//! Persistence adapter for the dashboard collections.
//!
//! A [`KeyValueStore`] medium holds one JSON-encoded array per collection.
//! [`Persistence`] wraps an optional medium and exposes typed load/save
//! operations plus the read-modify-write helpers the mock API builds on.
//! Decode failures and missing media never surface as errors: the adapter
//! degrades to defaults and best-effort writes.

pub mod medium;
pub mod persistence;
pub mod seed;

pub use medium::file::FileStore;
pub use medium::memory::MemoryStore;
pub use medium::{KeyValueStore, StorageError};
pub use persistence::{Persistence, DESIGNERS_KEY, OBJECTS_KEY};
