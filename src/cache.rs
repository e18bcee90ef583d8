use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A thread-safe in-memory cache with TTL (time-to-live) support
pub struct TtlCache<K, V> {
    data: DashMap<K, TtlEntry<V>>,
    ttl: Duration,
}

struct TtlEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<K, V> TtlCache<K, V>
where
    K: std::hash::Hash + Eq + Clone,
    V: Clone,
{
    /// Create a new cache with the specified TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            data: DashMap::new(),
            ttl,
        }
    }

    /// Get a value from the cache if it exists and hasn't expired
    pub fn get(&self, key: &K) -> Option<V> {
        let entry = self.data.get(key)?;
        if entry.expires_at > Instant::now() {
            Some(entry.value.clone())
        } else {
            drop(entry);
            self.data.remove(key);
            None
        }
    }

    /// Insert a value into the cache
    pub fn insert(&self, key: K, value: V) {
        let entry = TtlEntry {
            value,
            expires_at: Instant::now() + self.ttl,
        };
        self.data.insert(key, entry);
    }

    /// Remove expired entries from the cache
    pub fn cleanup(&self) {
        let now = Instant::now();
        self.data.retain(|_, entry| entry.expires_at > now);
    }

    /// Number of entries in the cache (including expired ones)
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Geocoding cache for storing place-name lookups
pub type GeoCache = Arc<TtlCache<String, CachedGeoMatch>>;

/// Cached version of a geocoding match (needs Clone)
#[derive(Debug, Clone)]
pub struct CachedGeoMatch {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: Option<String>,
}

/// Create a geocoding cache with 24-hour TTL
pub fn create_geo_cache() -> GeoCache {
    Arc::new(TtlCache::new(Duration::from_secs(24 * 60 * 60)))
}

/// Normalize a place-name string for use as a cache key
pub fn normalize_cache_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Start a background task that cleans up expired cache entries hourly
pub fn start_cache_cleanup_task(cache: GeoCache) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60 * 60));
        loop {
            interval.tick().await;
            let before = cache.len();
            cache.cleanup();
            let after = cache.len();
            if before != after {
                tracing::debug!(
                    removed = before - after,
                    remaining = after,
                    "Geocoding cache cleanup completed"
                );
            }
        }
    });
}

// ============================================================================
// Single-entry persistent cache
// ============================================================================

/// On-disk layout of the single cache slot.
#[derive(Debug, Deserialize)]
struct StoredEntry<T> {
    city: String,
    timestamp: i64,
    data: T,
}

#[derive(Debug, Serialize)]
struct StoredEntryRef<'a, T> {
    city: &'a str,
    timestamp: i64,
    data: &'a T,
}

/// A one-slot key-value cache persisted as a JSON file.
///
/// Holds at most one payload at a time, keyed by a normalized city name
/// with a write timestamp. A read hits only when the key matches and the
/// entry is younger than the TTL; a different city, an expired entry, or
/// a missing or unparseable file is a miss. The slot is replaced
/// wholesale on every store, never partially updated.
pub struct SingleEntryCache<T> {
    path: PathBuf,
    ttl_secs: i64,
    _marker: std::marker::PhantomData<T>,
}

impl<T> SingleEntryCache<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>, ttl_secs: i64) -> Self {
        Self {
            path: path.into(),
            ttl_secs,
            _marker: std::marker::PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the slot. Corruption is treated as a miss, never an error.
    pub fn load(&self, city: &str, now_ts: i64) -> Option<T> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return None,
        };

        let entry: StoredEntry<T> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(
                    path = %self.path.display(),
                    error = %e,
                    "Cache entry unreadable, treating as miss"
                );
                return None;
            }
        };

        if normalize_cache_key(&entry.city) != normalize_cache_key(city) {
            return None;
        }
        if now_ts - entry.timestamp >= self.ttl_secs {
            return None;
        }

        Some(entry.data)
    }

    /// Overwrite the slot. Write failures degrade to a warning; the
    /// caller's result does not depend on the cache being writable.
    pub fn store(&self, city: &str, now_ts: i64, data: &T) {
        let entry = StoredEntryRef {
            city,
            timestamp: now_ts,
            data,
        };

        let json = match serde_json::to_string(&entry) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize cache entry");
                return;
            }
        };

        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!(
                    path = %parent.display(),
                    error = %e,
                    "Failed to create cache directory"
                );
                return;
            }
        }

        // Write-then-rename so a crash mid-write leaves the old entry intact.
        let tmp = self.path.with_extension("tmp");
        if let Err(e) = std::fs::write(&tmp, json) {
            tracing::warn!(path = %tmp.display(), error = %e, "Failed to write cache entry");
            return;
        }
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to publish cache entry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_cache_insert_and_get() {
        let cache: TtlCache<String, String> = TtlCache::new(Duration::from_secs(60));
        cache.insert("key".to_string(), "value".to_string());
        assert_eq!(cache.get(&"key".to_string()), Some("value".to_string()));
    }

    #[test]
    fn test_ttl_cache_miss() {
        let cache: TtlCache<String, String> = TtlCache::new(Duration::from_secs(60));
        assert_eq!(cache.get(&"missing".to_string()), None);
    }

    #[test]
    fn test_ttl_cache_expiry() {
        let cache: TtlCache<String, String> = TtlCache::new(Duration::from_millis(1));
        cache.insert("key".to_string(), "value".to_string());
        std::thread::sleep(Duration::from_millis(10));
        assert_eq!(cache.get(&"key".to_string()), None);
    }

    #[test]
    fn test_ttl_cache_cleanup() {
        let cache: TtlCache<String, String> = TtlCache::new(Duration::from_millis(1));
        cache.insert("key1".to_string(), "value1".to_string());
        cache.insert("key2".to_string(), "value2".to_string());
        std::thread::sleep(Duration::from_millis(10));
        cache.cleanup();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_normalize_cache_key() {
        assert_eq!(normalize_cache_key("  Ankara  "), "ankara");
        assert_eq!(normalize_cache_key("NEW YORK"), "new york");
    }

    fn temp_cache(ttl_secs: i64) -> (tempfile::TempDir, SingleEntryCache<Vec<i32>>) {
        let dir = tempfile::tempdir().unwrap();
        let cache = SingleEntryCache::new(dir.path().join("slot.json"), ttl_secs);
        (dir, cache)
    }

    #[test]
    fn test_single_entry_round_trip() {
        let (_dir, cache) = temp_cache(3600);
        cache.store("İstanbul", 1000, &vec![1, 2, 3]);
        assert_eq!(cache.load("İstanbul", 1500), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_single_entry_key_is_normalized() {
        let (_dir, cache) = temp_cache(3600);
        cache.store("  Ankara ", 1000, &vec![7]);
        assert_eq!(cache.load("ankara", 1001), Some(vec![7]));
    }

    #[test]
    fn test_single_entry_different_city_misses() {
        let (_dir, cache) = temp_cache(3600);
        cache.store("İstanbul", 1000, &vec![1]);
        assert_eq!(cache.load("Ankara", 1001), None);
    }

    #[test]
    fn test_single_entry_expires() {
        let (_dir, cache) = temp_cache(3600);
        cache.store("İstanbul", 1000, &vec![1]);
        assert_eq!(cache.load("İstanbul", 1000 + 3600), None);
    }

    #[test]
    fn test_single_entry_corrupt_file_is_a_miss() {
        let (_dir, cache) = temp_cache(3600);
        std::fs::write(cache.path(), "{not json").unwrap();
        assert_eq!(cache.load("İstanbul", 0), None);
    }

    #[test]
    fn test_single_entry_overwrites_previous_city() {
        let (_dir, cache) = temp_cache(3600);
        cache.store("İstanbul", 1000, &vec![1]);
        cache.store("Ankara", 2000, &vec![2]);
        assert_eq!(cache.load("İstanbul", 2001), None);
        assert_eq!(cache.load("Ankara", 2001), Some(vec![2]));
    }
}
