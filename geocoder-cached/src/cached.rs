//! Caching decorator for geocoders.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use geocoder_core::error::{GeocodeError, Result};
use geocoder_core::traits::{ExpiringCache, Geocoder};
use geocoder_core::types::{Address, CacheKey, CachedLookup, Location};

/// Geocoder that answers from a shared cache before asking the wrapped provider.
///
/// Lookup flow:
/// 1. Derive a direction-tagged [`CacheKey`] from the query
/// 2. On a hit, return the cached value (or `NotFound` for a cached "no result")
/// 3. On a miss, ask the wrapped geocoder
/// 4. Store successes and `NotFound` answers with the cache's TTL; pass every
///    other error through without caching
///
/// No locking is done here: two concurrent misses on the same key both reach
/// the provider and both write, and the last write wins.
pub struct CachingGeocoder {
    inner: Arc<dyn Geocoder>,
    cache: Arc<dyn ExpiringCache>,
}

impl CachingGeocoder {
    /// Wraps `inner` with `cache`. The cache may be shared with other geocoders.
    pub fn new(inner: Arc<dyn Geocoder>, cache: Arc<dyn ExpiringCache>) -> Self {
        Self { inner, cache }
    }

    /// The wrapped geocoder.
    pub fn inner(&self) -> &Arc<dyn Geocoder> {
        &self.inner
    }

    /// The shared cache.
    pub fn cache(&self) -> &Arc<dyn ExpiringCache> {
        &self.cache
    }

    /// Forward lookup with cache metadata.
    #[instrument(skip(self))]
    pub async fn geocode_full(&self, address: &str) -> Result<LookupResult<Location>> {
        let key = CacheKey::forward(address);

        match self.cache.get(key.as_str()) {
            Some(CachedLookup::Location(location)) => {
                debug!(%key, "Cache hit");
                return Ok(LookupResult::cached(location, key));
            }
            Some(CachedLookup::NoResult) => {
                debug!(%key, "Cache hit (no result)");
                return Err(GeocodeError::NotFound);
            }
            Some(other) => {
                warn!(%key, ?other, "Ignoring cached value of the wrong kind");
            }
            None => debug!(%key, "Cache miss, querying provider"),
        }

        let result = self.inner.geocode(address).await;
        self.remember(&key, result)
            .map(|location| LookupResult::fresh(location, key))
    }

    /// Reverse lookup with cache metadata.
    #[instrument(skip(self))]
    pub async fn reverse_geocode_full(&self, lat: f64, lng: f64) -> Result<LookupResult<Address>> {
        let key = CacheKey::reverse(lat, lng);

        match self.cache.get(key.as_str()) {
            Some(CachedLookup::Address(address)) => {
                debug!(%key, "Cache hit");
                return Ok(LookupResult::cached(address, key));
            }
            Some(CachedLookup::NoResult) => {
                debug!(%key, "Cache hit (no result)");
                return Err(GeocodeError::NotFound);
            }
            Some(other) => {
                warn!(%key, ?other, "Ignoring cached value of the wrong kind");
            }
            None => debug!(%key, "Cache miss, querying provider"),
        }

        let result = self.inner.reverse_geocode(lat, lng).await;
        self.remember(&key, result)
            .map(|address| LookupResult::fresh(address, key))
    }

    /// Applies the caching policy to a provider answer.
    fn remember<T>(&self, key: &CacheKey, result: Result<T>) -> Result<T>
    where
        T: Clone + Into<CachedLookup>,
    {
        match result {
            Ok(value) => {
                self.cache.set(key.as_str(), value.clone().into());
                info!(%key, provider = self.inner.name(), "Resolved and cached");
                Ok(value)
            }
            Err(GeocodeError::NotFound) => {
                self.cache.set(key.as_str(), CachedLookup::NoResult);
                debug!(%key, provider = self.inner.name(), "No result, cached");
                Err(GeocodeError::NotFound)
            }
            Err(e) => {
                warn!(
                    %key,
                    provider = self.inner.name(),
                    error = %e,
                    "Provider failed, not caching"
                );
                Err(e)
            }
        }
    }
}

#[async_trait]
impl Geocoder for CachingGeocoder {
    async fn geocode(&self, address: &str) -> Result<Location> {
        self.geocode_full(address).await.map(|r| r.value)
    }

    async fn reverse_geocode(&self, lat: f64, lng: f64) -> Result<Address> {
        self.reverse_geocode_full(lat, lng).await.map(|r| r.value)
    }

    fn name(&self) -> &str {
        "cached"
    }
}

/// Result of a cached lookup with metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct LookupResult<T> {
    /// The resolved value
    pub value: T,
    /// The cache key the query mapped to
    pub key: CacheKey,
    /// Whether the result came from cache
    pub from_cache: bool,
}

impl<T> LookupResult<T> {
    fn cached(value: T, key: CacheKey) -> Self {
        Self {
            value,
            key,
            from_cache: true,
        }
    }

    fn fresh(value: T, key: CacheKey) -> Self {
        Self {
            value,
            key,
            from_cache: false,
        }
    }
}
