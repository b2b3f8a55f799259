//! In-memory cache implementation with LRU eviction.
//!
//! Provides a thread-safe in-memory cache with TTL support using
//! tokio synchronization primitives and LRU eviction policy.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::Mutex;

use roster_core::cache::{Cache, CacheError, CacheLookup, Result};

/// A single cache entry with optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    /// Creates a new cache entry with optional TTL.
    ///
    /// A TTL too large to represent as an instant never expires.
    fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.and_then(|d| Instant::now().checked_add(d));
        Self { value, expires_at }
    }

    /// Returns true if this entry has expired.
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() >= exp)
    }
}

/// In-memory cache implementation with LRU eviction.
///
/// Thread-safe cache using `Arc<Mutex<LruCache>>`; every access updates the
/// LRU order, so reads take the lock exclusively too. Expired entries are
/// dropped lazily when they are next read.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<Mutex<LruCache<String, CacheEntry>>>,
}

impl MemoryCache {
    /// Creates a new in-memory cache with LRU eviction.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::OperationFailed` if `max_entries` is 0.
    pub fn new(max_entries: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(max_entries).ok_or_else(|| {
            CacheError::OperationFailed("max_entries must be > 0".to_string())
        })?;
        Ok(Self {
            store: Arc::new(Mutex::new(LruCache::new(capacity))),
        })
    }

    /// Returns the number of stored entries, expired ones included.
    #[cfg(test)]
    async fn len(&self) -> usize {
        self.store.lock().await.len()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<CacheLookup> {
        let mut store = self.store.lock().await;

        match store.get(key) {
            Some(entry) if entry.is_expired() => {
                store.pop(key);
                Ok(CacheLookup::Miss)
            }
            Some(entry) => Ok(CacheLookup::Found(entry.value.clone())),
            None => Ok(CacheLookup::Miss),
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut store = self.store.lock().await;
        store.put(key.to_string(), CacheEntry::new(value.to_vec(), ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut store = self.store.lock().await;
        store.pop(key);
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.store.lock().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Default max entries for tests
    const TEST_MAX_ENTRIES: usize = 1000;

    fn test_cache() -> MemoryCache {
        MemoryCache::new(TEST_MAX_ENTRIES).unwrap()
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = test_cache();
        let key = "test:key";
        let value = b"test value";

        cache.set(key, value, None).await.unwrap();
        let result = cache.get(key).await.unwrap();

        assert_eq!(result, CacheLookup::Found(value.to_vec()));
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let cache = test_cache();
        let result = cache.get("nonexistent:key").await.unwrap();

        assert_eq!(result, CacheLookup::Miss);
    }

    #[tokio::test]
    async fn test_delete() {
        let cache = test_cache();
        let key = "test:delete";

        cache.set(key, b"to be deleted", None).await.unwrap();
        assert!(matches!(cache.get(key).await.unwrap(), CacheLookup::Found(_)));

        cache.delete(key).await.unwrap();
        assert_eq!(cache.get(key).await.unwrap(), CacheLookup::Miss);
    }

    #[tokio::test]
    async fn test_delete_absent_key_is_ok() {
        let cache = test_cache();

        cache.delete("entities:list").await.unwrap();
        cache.delete("entities:list").await.unwrap();
    }

    #[tokio::test]
    async fn test_ttl_expiration() {
        let cache = test_cache();
        let key = "test:ttl";

        cache
            .set(key, b"short-lived", Some(Duration::from_millis(50)))
            .await
            .unwrap();

        // Should exist immediately
        assert!(matches!(cache.get(key).await.unwrap(), CacheLookup::Found(_)));

        tokio::time::sleep(Duration::from_millis(100)).await;

        // Expired entries read as misses and are dropped
        assert_eq!(cache.get(key).await.unwrap(), CacheLookup::Miss);
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn test_overwrite_value() {
        let cache = test_cache();
        let key = "test:overwrite";

        cache.set(key, b"first", None).await.unwrap();
        cache.set(key, b"second", None).await.unwrap();

        let result = cache.get(key).await.unwrap();
        assert_eq!(result, CacheLookup::Found(b"second".to_vec()));
    }

    #[tokio::test]
    async fn test_overwrite_resets_ttl() {
        let cache = test_cache();
        let key = "test:reset";

        cache
            .set(key, b"first", Some(Duration::from_millis(50)))
            .await
            .unwrap();
        cache.set(key, b"second", None).await.unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(matches!(cache.get(key).await.unwrap(), CacheLookup::Found(_)));
    }

    #[tokio::test]
    async fn test_no_ttl_never_expires() {
        let cache = test_cache();
        let key = "test:no-ttl";

        cache.set(key, b"persistent", None).await.unwrap();

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(matches!(cache.get(key).await.unwrap(), CacheLookup::Found(_)));
    }

    #[tokio::test]
    async fn test_huge_ttl_never_expires() {
        let cache = test_cache();
        let key = "test:huge-ttl";

        cache
            .set(key, b"kept", Some(Duration::from_secs(u64::MAX)))
            .await
            .unwrap();

        assert_eq!(
            cache.get(key).await.unwrap(),
            CacheLookup::Found(b"kept".to_vec())
        );
    }

    #[tokio::test]
    async fn test_repository_with_huge_ttl_caches_writes() {
        use chrono::NaiveDate;
        use roster_core::employee::EmployeeFields;
        use roster_core::repository::{EmployeeRepository, OpContext};

        use crate::storage::inmemory::InMemoryStore;
        use crate::storage::CachedEmployeeRepository;

        let cache = Arc::new(test_cache());
        let repo = CachedEmployeeRepository::new(
            Arc::new(InMemoryStore::new()),
            cache.clone(),
            Duration::from_secs(u64::MAX),
        );
        let fields = EmployeeFields::new(
            "A",
            "B",
            100,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        );

        let outcome = repo
            .create_employee(&OpContext::new(), &fields)
            .await
            .unwrap();

        assert!(outcome.is_clean());
        let key = format!("entity:{}", outcome.value);
        assert!(matches!(cache.get(&key).await.unwrap(), CacheLookup::Found(_)));
    }

    #[tokio::test]
    async fn test_lru_eviction() {
        // Create a cache with only 3 entries max
        let cache = MemoryCache::new(3).unwrap();

        cache.set("key1", b"value1", None).await.unwrap();
        cache.set("key2", b"value2", None).await.unwrap();
        cache.set("key3", b"value3", None).await.unwrap();

        // Access key1 to make it recently used
        cache.get("key1").await.unwrap();

        // Insert a 4th entry - should evict key2 (least recently used)
        cache.set("key4", b"value4", None).await.unwrap();

        assert!(matches!(cache.get("key1").await.unwrap(), CacheLookup::Found(_)));
        assert_eq!(cache.get("key2").await.unwrap(), CacheLookup::Miss);
        assert!(matches!(cache.get("key3").await.unwrap(), CacheLookup::Found(_)));
        assert!(matches!(cache.get("key4").await.unwrap(), CacheLookup::Found(_)));
    }

    #[tokio::test]
    async fn test_zero_max_entries_is_rejected() {
        assert!(matches!(
            MemoryCache::new(0),
            Err(CacheError::OperationFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_close_drops_entries() {
        let cache = test_cache();
        cache.set("key", b"value", None).await.unwrap();

        cache.close().await.unwrap();
        assert_eq!(cache.len().await, 0);
    }
}
