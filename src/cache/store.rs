//! Cache Store Module
//!
//! Key-value storage with per-entry TTL, evaluated lazily at read time.

use std::collections::HashMap;

use crate::cache::CacheEntry;

// == Cache Store ==
/// In-memory store mapping string keys to values with a per-entry TTL.
///
/// There is no capacity bound and no eviction policy besides TTL. Expired
/// entries read as absent but stay in the map until they are overwritten,
/// removed, or purged.
///
/// The store takes `&mut self` for mutations; callers sharing it between
/// tasks wrap it in a lock.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty CacheStore.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    // == Set ==
    /// Stores a value under `key` for `ttl_seconds`.
    ///
    /// If the key already exists, both the value and the creation time are
    /// replaced.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl_seconds: u64) {
        self.entries.insert(key.into(), CacheEntry::new(value, ttl_seconds));
    }

    // == Get ==
    /// Returns the value for `key` if it exists and is still live.
    ///
    /// A key that was never set and a key whose entry has expired both read
    /// as `None`. The expired entry is left in place.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.get_entry(key).map(|entry| &entry.value)
    }

    // == Get Entry ==
    /// Returns the live entry for `key`, with its timing metadata.
    pub fn get_entry(&self, key: &str) -> Option<&CacheEntry<V>> {
        self.entries.get(key).filter(|entry| !entry.is_expired())
    }

    // == Remove ==
    /// Removes `key`, returning the stored value if there was one.
    ///
    /// Removing an absent key is a no-op.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.entries.remove(key).map(|entry| entry.value)
    }

    // == Purge Expired ==
    /// Physically removes every expired entry.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        before - self.entries.len()
    }

    // == Length ==
    /// Returns the number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for CacheStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_store_new() {
        let store: CacheStore<u32> = CacheStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = CacheStore::new();

        store.set("+15550005555", 123456u32, 900);

        assert_eq!(store.get("+15550005555"), Some(&123456));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let store: CacheStore<u32> = CacheStore::new();

        assert!(store.get("nonexistent").is_none());
    }

    #[test]
    fn test_store_remove() {
        let mut store = CacheStore::new();

        store.set("key1", "value1", 300);
        assert_eq!(store.remove("key1"), Some("value1"));

        assert!(store.is_empty());
        assert!(store.get("key1").is_none());
    }

    #[test]
    fn test_store_remove_nonexistent() {
        let mut store: CacheStore<u32> = CacheStore::new();

        assert!(store.remove("nonexistent").is_none());
        assert!(store.remove("nonexistent").is_none());
        assert!(store.get("nonexistent").is_none());
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = CacheStore::new();

        store.set("key1", 111111u32, 300);
        store.set("key1", 222222u32, 300);

        assert_eq!(store.get("key1"), Some(&222222));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_ttl_expiration() {
        let mut store = CacheStore::new();

        store.set("key1", "value1", 1);
        assert!(store.get("key1").is_some());

        sleep(Duration::from_millis(1100));

        assert!(store.get("key1").is_none());
        // Lazy expiry: the entry is still physically present
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_overwrite_resets_ttl() {
        let mut store = CacheStore::new();

        store.set("key1", "old", 1);
        sleep(Duration::from_millis(1100));
        assert!(store.get("key1").is_none());

        store.set("key1", "new", 300);
        assert_eq!(store.get("key1"), Some(&"new"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_purge_expired() {
        let mut store = CacheStore::new();

        store.set("key1", "value1", 1);
        store.set("key2", "value2", 10);

        sleep(Duration::from_millis(1100));

        assert_eq!(store.purge_expired(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.get("key2").is_some());
        assert_eq!(store.purge_expired(), 0);
    }
}
