//! Constants shared across the geocoder crates.

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE DEFAULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Default time-to-live for cached lookups, in seconds (5 minutes).
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 300;

/// Default interval between background sweeps of expired entries, in seconds.
pub const DEFAULT_CLEANUP_INTERVAL_SECONDS: u64 = 30;

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE KEY NAMESPACES
// ═══════════════════════════════════════════════════════════════════════════════
// Forward and reverse keys live in disjoint namespaces so an address string
// can never collide with an encoded coordinate pair.

/// Prefix for forward (address → location) cache keys.
pub const FORWARD_KEY_PREFIX: &str = "geocode:";

/// Prefix for reverse (location → address) cache keys.
pub const REVERSE_KEY_PREFIX: &str = "reverse:";
