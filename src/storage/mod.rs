//! Durable key-value storage and the persisted-state cell built on it.

mod error;
mod file;
mod medium;
mod memory;
mod persistent;

pub use error::{Result, StorageError};
pub use file::FileMedium;
pub use medium::{DurableMedium, DEFAULT_QUOTA_BYTES};
pub use memory::MemoryMedium;
pub use persistent::{PersistentValueStore, StoredValue, Update};
