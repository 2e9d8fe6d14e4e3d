//! Common traits for geocoding.
//!
//! Every geocoder variant (single data source, fallback chain, cache
//! decorator) implements [`Geocoder`] and composes by wrapping another
//! `Geocoder`. Caches plug in through [`ExpiringCache`].

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Address, CachedLookup, Location};

// ═══════════════════════════════════════════════════════════════════════════════
// GEOCODER TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for two-directional geocoding lookups.
///
/// Implementations return [`GeocodeError::NotFound`](crate::GeocodeError::NotFound)
/// when a query is well-formed but has no result, and any other error kind
/// when the lookup itself failed.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Translates an address into a location.
    async fn geocode(&self, address: &str) -> Result<Location>;

    /// Translates a coordinate pair into an address.
    async fn reverse_geocode(&self, lat: f64, lng: f64) -> Result<Address>;

    /// Short provider name used in logs and error messages.
    fn name(&self) -> &str {
        "geocoder"
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// EXPIRING CACHE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for a key/value store with per-entry time-to-live.
///
/// A value stored with TTL `d` must be returned by `get` until `d` has
/// elapsed since insertion, and never afterwards. Implementations must be
/// safe for concurrent use; the geocoders add no locking of their own.
pub trait ExpiringCache: Send + Sync {
    /// Returns the live value for `key`, if any.
    fn get(&self, key: &str) -> Option<CachedLookup>;

    /// Stores `value` under `key` using the cache's configured TTL.
    fn set(&self, key: &str, value: CachedLookup);

    /// Stores `value` under `key` with an explicit TTL.
    fn set_with_ttl(&self, key: &str, value: CachedLookup, ttl: Duration);
}
