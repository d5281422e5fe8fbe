//! In-memory TTL cache adapter.

use std::time::{Duration, Instant};

use dashmap::DashMap;

use rdv_types::error::CacheError;
use rdv_types::ports::{Cache, sanitize_cache_key};

struct Entry {
    value: serde_json::Value,
    expires_at: Instant,
}

/// Cache backed by a concurrent map with per-entry expiry.
///
/// Expired entries are dropped lazily on read; there is no background
/// sweeper.
#[derive(Default)]
pub struct MemoryCache {
    entries: DashMap<String, Entry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (possibly expired, not yet evicted) entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait::async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, CacheError> {
        let key = sanitize_cache_key(key);
        if let Some(entry) = self.entries.get(&key) {
            if entry.expires_at > Instant::now() {
                return Ok(Some(entry.value.clone()));
            }
        } else {
            return Ok(None);
        }
        // Expired: evict and report a miss
        self.entries.remove(&key);
        Ok(None)
    }

    async fn set(
        &self,
        key: &str,
        value: serde_json::Value,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let key = sanitize_cache_key(key);
        self.entries.insert(
            key,
            Entry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        let key = sanitize_cache_key(key);
        Ok(self.entries.remove(&key).is_some())
    }

    async fn flush_prefix(&self, prefix: &str) -> Result<usize, CacheError> {
        let prefix = sanitize_cache_key(prefix);
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(&prefix));
        Ok(before - self.entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdv_types::ports::DEFAULT_CACHE_TTL;
    use serde_json::json;

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = MemoryCache::new();
        cache
            .set("export csv", json!({"rows": 3}), DEFAULT_CACHE_TTL)
            .await
            .unwrap();

        let value = cache.get("export csv").await.unwrap().unwrap();
        assert_eq!(value, json!({"rows": 3}));
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let cache = MemoryCache::new();
        assert!(cache.get("nothing here").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_entry_reads_as_absent() {
        let cache = MemoryCache::new();
        cache
            .set("short lived", json!(1), Duration::from_millis(10))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(30)).await;

        assert!(cache.get("short lived").await.unwrap().is_none());
        // The read evicted the entry
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let cache = MemoryCache::new();
        cache.set("key", json!(1), DEFAULT_CACHE_TTL).await.unwrap();

        assert!(cache.delete("key").await.unwrap());
        assert!(!cache.delete("key").await.unwrap());
    }

    #[tokio::test]
    async fn test_flush_prefix_only_removes_matching() {
        let cache = MemoryCache::new();
        cache
            .set("export_csv", json!(1), DEFAULT_CACHE_TTL)
            .await
            .unwrap();
        cache
            .set("export_excel", json!(2), DEFAULT_CACHE_TTL)
            .await
            .unwrap();
        cache
            .set("providers", json!(3), DEFAULT_CACHE_TTL)
            .await
            .unwrap();

        let removed = cache.flush_prefix("export").await.unwrap();
        assert_eq!(removed, 2);
        assert!(cache.get("export_csv").await.unwrap().is_none());
        assert!(cache.get("providers").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_keys_are_shared_after_sanitization() {
        let cache = MemoryCache::new();
        cache
            .set("Export CSV!", json!("a"), DEFAULT_CACHE_TTL)
            .await
            .unwrap();

        // Same key after sanitization
        let value = cache.get("export_csv").await.unwrap().unwrap();
        assert_eq!(value, json!("a"));
    }
}
