//! Cache-facing types: what is stored and under which key.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::location::{canonical_bits, Address, Location};
use crate::constants::{FORWARD_KEY_PREFIX, REVERSE_KEY_PREFIX};

// ═══════════════════════════════════════════════════════════════════════════════
// CACHED LOOKUP
// ═══════════════════════════════════════════════════════════════════════════════

/// Value of a cache entry.
///
/// `NoResult` records that the provider answered "not found", so repeated
/// futile queries are served from the cache.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CachedLookup {
    /// Result of a forward lookup
    Location(Location),
    /// Result of a reverse lookup
    Address(Address),
    /// The provider had no result for the query
    NoResult,
}

impl From<Location> for CachedLookup {
    fn from(location: Location) -> Self {
        CachedLookup::Location(location)
    }
}

impl From<Address> for CachedLookup {
    fn from(address: Address) -> Self {
        CachedLookup::Address(address)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE KEY
// ═══════════════════════════════════════════════════════════════════════════════

/// A cache key derived from a geocoding query.
///
/// Forward keys are `geocode:<address>`; reverse keys are
/// `reverse:<lat bits>,<lng bits>` with the IEEE-754 bits hex-encoded, so each
/// exact coordinate pair gets its own key and the two namespaces are disjoint.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for a forward (address → location) lookup.
    pub fn forward(address: &str) -> Self {
        Self(format!("{FORWARD_KEY_PREFIX}{address}"))
    }

    /// Key for a reverse (location → address) lookup.
    pub fn reverse(lat: f64, lng: f64) -> Self {
        Self(format!(
            "{REVERSE_KEY_PREFIX}{},{}",
            hex::encode(canonical_bits(lat).to_be_bytes()),
            hex::encode(canonical_bits(lng).to_be_bytes()),
        ))
    }

    /// Returns the encoded key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
