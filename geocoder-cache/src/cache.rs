//! In-memory TTL cache for geocoding lookups.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use geocoder_core::constants::{DEFAULT_CACHE_TTL_SECONDS, DEFAULT_CLEANUP_INTERVAL_SECONDS};
use geocoder_core::traits::ExpiringCache;
use geocoder_core::types::CachedLookup;

/// Cache entry with TTL.
#[derive(Clone)]
struct CacheEntry {
    value: CachedLookup,
    inserted_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.inserted_at) > self.ttl
    }
}

/// Cache configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// TTL applied by `set`, in seconds
    pub default_ttl_seconds: u64,
    /// Minimum time between sweeps of expired entries, in seconds
    pub cleanup_interval_seconds: u64,
    /// Whether `set` sweeps expired entries once the cleanup interval has passed
    pub auto_cleanup: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            cleanup_interval_seconds: DEFAULT_CLEANUP_INTERVAL_SECONDS,
            auto_cleanup: true,
        }
    }
}

impl CacheConfig {
    /// Creates a config with the given default TTL.
    pub fn with_ttl_seconds(ttl_seconds: u64) -> Self {
        Self {
            default_ttl_seconds: ttl_seconds,
            ..Default::default()
        }
    }

    /// Sets the sweep interval.
    pub fn cleanup_every(mut self, seconds: u64) -> Self {
        self.cleanup_interval_seconds = seconds;
        self
    }

    /// Disables the opportunistic sweep in `set`.
    pub fn no_auto_cleanup(mut self) -> Self {
        self.auto_cleanup = false;
        self
    }
}

/// In-memory cache for geocoding lookups.
///
/// Thread-safe and supports TTL-based expiration. Expired entries are never
/// returned by `get`; they are physically removed by `cleanup_expired`, by
/// `set` when `auto_cleanup` is on, or by the task from [`TtlCache::spawn_cleanup`].
pub struct TtlCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    default_ttl: Duration,
    cleanup_interval: Duration,
    auto_cleanup: bool,
    last_cleanup: Mutex<Instant>,
}

impl TtlCache {
    /// Creates a new cache with default configuration.
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Creates a cache with custom configuration.
    pub fn with_config(config: CacheConfig) -> Self {
        Self::build(
            Duration::from_secs(config.default_ttl_seconds),
            Duration::from_secs(config.cleanup_interval_seconds),
            config.auto_cleanup,
        )
    }

    /// Creates a cache with a sub-second default TTL.
    ///
    /// The sweep interval defaults to the TTL itself.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self::build(ttl, ttl, true)
    }

    fn build(default_ttl: Duration, cleanup_interval: Duration, auto_cleanup: bool) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default_ttl,
            // tokio intervals reject a zero period
            cleanup_interval: cleanup_interval.max(Duration::from_millis(1)),
            auto_cleanup,
            last_cleanup: Mutex::new(Instant::now()),
        }
    }

    /// TTL applied by `set`.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Gets a live cached value by key.
    ///
    /// Returns None if not cached or expired.
    pub fn get(&self, key: &str) -> Option<CachedLookup> {
        let now = Instant::now();
        let entries = self.entries.read();
        entries
            .get(key)
            .filter(|e| !e.is_expired(now))
            .map(|e| e.value.clone())
    }

    /// Caches a value with the default TTL.
    pub fn set(&self, key: &str, value: CachedLookup) {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    /// Caches a value with a custom TTL.
    pub fn set_with_ttl(&self, key: &str, value: CachedLookup, ttl: Duration) {
        let now = Instant::now();
        let mut entries = self.entries.write();

        if self.auto_cleanup && self.cleanup_due(now) {
            Self::cleanup_expired_internal(&mut entries, now);
        }

        let entry = CacheEntry {
            value,
            inserted_at: now,
            ttl,
        };
        entries.insert(key.to_string(), entry);
    }

    /// Removes a cached entry.
    pub fn remove(&self, key: &str) {
        self.entries.write().remove(key);
    }

    /// Clears all cached entries.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Removes all expired entries, returning how many were dropped.
    pub fn cleanup_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write();
        *self.last_cleanup.lock() = now;
        Self::cleanup_expired_internal(&mut entries, now)
    }

    fn cleanup_due(&self, now: Instant) -> bool {
        let mut last = self.last_cleanup.lock();
        if now.duration_since(*last) >= self.cleanup_interval {
            *last = now;
            true
        } else {
            false
        }
    }

    fn cleanup_expired_internal(entries: &mut HashMap<String, CacheEntry>, now: Instant) -> usize {
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    /// Returns the number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let entries = self.entries.read();
        let expired = entries.values().filter(|e| e.is_expired(now)).count();

        CacheStats {
            total_entries: entries.len(),
            expired_entries: expired,
            valid_entries: entries.len() - expired,
        }
    }

    /// Spawns a task on the current tokio runtime that sweeps expired
    /// entries every cleanup interval.
    ///
    /// The task holds a weak reference and exits once the cache is dropped.
    pub fn spawn_cleanup(cache: &Arc<Self>) -> JoinHandle<()> {
        let weak = Arc::downgrade(cache);
        let period = cache.cleanup_interval;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // First tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let Some(cache) = weak.upgrade() else {
                    debug!("Cache dropped, stopping cleanup task");
                    break;
                };
                let removed = cache.cleanup_expired();
                if removed > 0 {
                    debug!(removed, "Swept expired cache entries");
                }
            }
        })
    }
}

impl Default for TtlCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpiringCache for TtlCache {
    fn get(&self, key: &str) -> Option<CachedLookup> {
        TtlCache::get(self, key)
    }

    fn set(&self, key: &str, value: CachedLookup) {
        TtlCache::set(self, key, value)
    }

    fn set_with_ttl(&self, key: &str, value: CachedLookup, ttl: Duration) {
        TtlCache::set_with_ttl(self, key, value, ttl)
    }
}

/// Cache statistics.
#[derive(Clone, Debug)]
pub struct CacheStats {
    /// Total entries (including expired)
    pub total_entries: usize,
    /// Expired entries
    pub expired_entries: usize,
    /// Valid (non-expired) entries
    pub valid_entries: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use geocoder_core::types::{Address, Location};

    fn melbourne() -> CachedLookup {
        CachedLookup::Location(Location::new(-37.814107, 144.96328))
    }

    #[test]
    fn test_cache_set_get() {
        let cache = TtlCache::new();
        cache.set("geocode:Melbourne VIC", melbourne());

        assert_eq!(cache.get("geocode:Melbourne VIC"), Some(melbourne()));
    }

    #[test]
    fn test_cache_keys_are_exact() {
        let cache = TtlCache::new();
        cache.set("geocode:Austin,TX", melbourne());

        assert!(cache.get("geocode:austin,tx").is_none());
        assert!(cache.get("geocode:Austin,TX ").is_none());
    }

    #[test]
    fn test_cache_miss() {
        let cache = TtlCache::new();
        assert!(cache.get("geocode:nowhere").is_none());
    }

    #[test]
    fn test_cache_stores_no_result_marker() {
        let cache = TtlCache::new();
        cache.set("reverse:00,00", CachedLookup::NoResult);

        assert_eq!(cache.get("reverse:00,00"), Some(CachedLookup::NoResult));
    }

    #[test]
    fn test_cache_overwrite_last_write_wins() {
        let cache = TtlCache::new();
        cache.set("k", CachedLookup::NoResult);
        cache.set("k", CachedLookup::Address(Address::from("Austin, TX")));

        assert_eq!(cache.get("k"), Some(CachedLookup::Address(Address::from("Austin, TX"))));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_remove() {
        let cache = TtlCache::new();
        cache.set("k", melbourne());

        cache.remove("k");

        assert!(cache.get("k").is_none());
    }

    #[test]
    fn test_cache_clear() {
        let cache = TtlCache::new();
        cache.set("a", melbourne());
        cache.set("b", CachedLookup::NoResult);

        cache.clear();

        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_ttl_expiration() {
        let cache = TtlCache::new();

        cache.set_with_ttl("k", melbourne(), Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(10));

        assert!(cache.get("k").is_none());
    }

    #[test]
    fn test_cache_max_ttl_never_expires() {
        let cache = TtlCache::new();
        cache.set_with_ttl("k", melbourne(), Duration::MAX);

        assert_eq!(cache.get("k"), Some(melbourne()));
        assert_eq!(cache.cleanup_expired(), 0);
        assert_eq!(cache.stats().valid_entries, 1);
    }

    #[test]
    fn test_cache_max_ttl_seconds_config() {
        let config: CacheConfig =
            serde_json::from_str(r#"{"default_ttl_seconds": 18446744073709551615}"#).unwrap();
        let cache = TtlCache::with_config(config);

        cache.set("k", melbourne());
        cache.set("other", CachedLookup::NoResult);

        assert_eq!(cache.get("k"), Some(melbourne()));
        assert_eq!(cache.get("other"), Some(CachedLookup::NoResult));
    }

    #[test]
    fn test_cache_default_ttl_applies() {
        let cache = TtlCache::with_ttl(Duration::from_millis(20));
        assert_eq!(cache.default_ttl(), Duration::from_millis(20));

        cache.set("k", melbourne());
        assert!(cache.get("k").is_some());

        std::thread::sleep(Duration::from_millis(40));
        assert!(cache.get("k").is_none());
    }

    #[test]
    fn test_cache_stats() {
        let cache = TtlCache::new();
        cache.set("a", melbourne());
        cache.set_with_ttl("b", CachedLookup::NoResult, Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(10));

        let stats = cache.stats();
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.valid_entries, 1);
        assert_eq!(stats.expired_entries, 1);
    }

    #[test]
    fn test_cache_cleanup_expired() {
        let cache = TtlCache::new();

        cache.set_with_ttl("a", melbourne(), Duration::from_millis(1));
        cache.set("b", melbourne());
        std::thread::sleep(Duration::from_millis(10));

        assert_eq!(cache.cleanup_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.get("b").is_some());
    }

    #[test]
    fn test_set_sweeps_once_interval_elapsed() {
        let cache = TtlCache::with_ttl(Duration::from_millis(5));
        cache.set("a", melbourne());
        std::thread::sleep(Duration::from_millis(20));

        cache.set("b", melbourne());

        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_set_without_auto_cleanup_keeps_expired() {
        let config = CacheConfig::with_ttl_seconds(60).cleanup_every(0).no_auto_cleanup();
        let cache = TtlCache::with_config(config);
        cache.set_with_ttl("a", melbourne(), Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(10));

        cache.set("b", melbourne());

        assert_eq!(cache.len(), 2);
        assert!(cache.get("a").is_none());
    }

    #[test]
    fn test_config_defaults_and_serde() {
        let config = CacheConfig::default();
        assert_eq!(config.default_ttl_seconds, 300);
        assert_eq!(config.cleanup_interval_seconds, 30);
        assert!(config.auto_cleanup);

        let parsed: CacheConfig = serde_json::from_str(r#"{"default_ttl_seconds": 60}"#).unwrap();
        assert_eq!(parsed.default_ttl_seconds, 60);
        assert_eq!(parsed.cleanup_interval_seconds, 30);
    }

    #[test]
    fn test_usable_as_trait_object() {
        let cache: Arc<dyn ExpiringCache> = Arc::new(TtlCache::new());
        cache.set("k", CachedLookup::NoResult);
        assert_eq!(cache.get("k"), Some(CachedLookup::NoResult));
    }

    #[tokio::test]
    async fn test_spawn_cleanup_sweeps_in_background() {
        let cache = Arc::new(TtlCache::with_ttl(Duration::from_millis(10)));
        cache.set_with_ttl("a", melbourne(), Duration::from_millis(1));
        cache.set_with_ttl("b", melbourne(), Duration::from_secs(60));

        let handle = TtlCache::spawn_cleanup(&cache);
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(cache.len(), 1);
        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_stops_when_cache_dropped() {
        let cache = Arc::new(TtlCache::with_ttl(Duration::from_millis(5)));
        let handle = TtlCache::spawn_cleanup(&cache);

        drop(cache);

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("cleanup task should exit")
            .unwrap();
    }
}
