//! Test doubles for the storage port adapter.

mod memory_store;

pub use memory_store::MemoryStore;
