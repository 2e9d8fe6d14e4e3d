//! Domain types for geocoding.
//!
//! - [`Location`]: A latitude/longitude pair in degrees
//! - [`Address`]: A free-form postal or place description
//! - [`CachedLookup`]: What a cache entry holds (location, address, or "no result")
//! - [`CacheKey`]: Direction-tagged cache key derived from a query

mod location;
mod lookup;

pub use location::*;
pub use lookup::*;
