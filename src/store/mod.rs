//! Implementations of the [`KeyValueStore`](crate::traits::KeyValueStore) storage boundary
//!
//! * [`MemoryStore`] keeps everything in memory. It can simulate latency, quotas and failures, and is mostly meant for tests
//! * [`FileStore`] keeps one file per key in a local folder

pub mod memory_store;
pub mod file_store;

pub use memory_store::MemoryStore;
pub use file_store::FileStore;
