//! # Cached Geocoder
//!
//! Wraps any [`Geocoder`](geocoder_core::Geocoder) with a shared
//! [`ExpiringCache`](geocoder_core::ExpiringCache) so repeated queries skip
//! the underlying provider. "No result" answers are cached too; provider
//! failures are not.
//!
//! ## Example
//!
//! ```rust,ignore
//! use geocoder_cache::TtlCache;
//! use geocoder_cached::CachingGeocoder;
//!
//! let cache = Arc::new(TtlCache::with_config(CacheConfig::with_ttl_seconds(300)));
//! let geocoder = CachingGeocoder::new(provider, cache);
//!
//! let location = geocoder.geocode("Melbourne VIC").await?;
//! let address = geocoder.reverse_geocode(-37.816742, 144.964463).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod cached;

pub use cached::{CachingGeocoder, LookupResult};
