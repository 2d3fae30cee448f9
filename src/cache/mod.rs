//! Cache Module
//!
//! Provides an in-memory key-value store with lazy TTL expiration.

mod entry;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use store::CacheStore;
