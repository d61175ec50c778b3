//! Local persistence: key-value backends and the slot-based record store

pub mod kv;
pub mod records;

pub use kv::{FileStorage, KeyValueStorage, MemoryStorage};
pub use records::{slot_key, RecordStore, SLOT_PREFIX};
