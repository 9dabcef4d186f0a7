//! Key/value store adapters

mod file_store;
mod memory_store;
mod unavailable;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use unavailable::UnavailableStore;
