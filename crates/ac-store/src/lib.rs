pub mod client_storage;
pub mod error;
pub mod file_storage;
pub mod memory_storage;
pub mod memory_store;
pub mod normalized_store;
mod normalizer;

pub use client_storage::{ClientStorage, TokenPair, read_token_pair};
pub use error::{Result as StoreResult, StoreError};
pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;
pub use memory_store::InMemoryStore;
pub use normalized_store::NormalizedStore;

#[cfg(test)]
mod tests;
