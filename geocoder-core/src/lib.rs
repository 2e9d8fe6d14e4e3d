//! # Geocoder Core
//!
//! Core types, errors, and traits shared by the geocoder crates.
//!
//! This crate provides the foundational building blocks used by all other geocoder crates:
//!
//! - **Types**: [`Location`], [`Address`], and the cache-facing [`CachedLookup`] / [`CacheKey`]
//! - **Errors**: [`GeocodeError`] with a distinguishable `NotFound` kind
//! - **Constants**: Cache defaults and key prefixes
//! - **Traits**: [`Geocoder`] and [`ExpiringCache`], the seams every variant composes over
//!
//! ## Example
//!
//! ```rust
//! use geocoder_core::{CacheKey, Location};
//!
//! let melbourne = Location::new(-37.814107, 144.96328);
//! let key = CacheKey::reverse(melbourne.lat, melbourne.lng);
//! assert!(key.as_str().starts_with("reverse:"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{GeocodeError, Result};
pub use traits::*;
pub use types::*;
