//! # Geocoder Data Sources
//!
//! Concrete [`Geocoder`](geocoder_core::Geocoder) variants:
//!
//! - **Data**: Lookups against in-memory address/location tables
//! - **Chained**: Ordered fallback over several geocoders
//!
//! ## Example
//!
//! ```rust,ignore
//! use geocoder_data::{ChainedGeocoder, DataGeocoder};
//!
//! let local = DataGeocoder::new()
//!     .with_location("Melbourne VIC", Location::new(-37.814107, 144.96328));
//! let chain = ChainedGeocoder::new(vec![Arc::new(local), Arc::new(remote)]);
//! let location = chain.geocode("Melbourne VIC").await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod chained;
mod data;

pub use chained::ChainedGeocoder;
pub use data::DataGeocoder;
