//! TTL cache for geocoding lookups.
//!
//! Thread-safe in-memory [`ExpiringCache`](geocoder_core::ExpiringCache) with
//! passive expiry, on-demand sweeps, and an optional background sweeper.

mod cache;

pub use cache::{CacheConfig, CacheStats, TtlCache};
