//! Ordered fallback over several geocoders.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use geocoder_core::error::{GeocodeError, Result};
use geocoder_core::traits::Geocoder;
use geocoder_core::types::{Address, Location};

/// Geocoder that asks each inner geocoder in turn.
///
/// The first success wins. A `NotFound` answer moves on to the next
/// geocoder; any other error stops the chain and is returned as is. If every
/// geocoder answers `NotFound` (or the chain is empty) the result is `NotFound`.
pub struct ChainedGeocoder {
    geocoders: Vec<Arc<dyn Geocoder>>,
}

impl ChainedGeocoder {
    /// Creates a chain that tries `geocoders` in order.
    pub fn new(geocoders: Vec<Arc<dyn Geocoder>>) -> Self {
        Self { geocoders }
    }

    /// Appends a geocoder to the end of the chain.
    pub fn then(mut self, geocoder: Arc<dyn Geocoder>) -> Self {
        self.geocoders.push(geocoder);
        self
    }

    /// Number of geocoders in the chain.
    pub fn len(&self) -> usize {
        self.geocoders.len()
    }

    /// Returns true if the chain has no geocoders.
    pub fn is_empty(&self) -> bool {
        self.geocoders.is_empty()
    }
}

#[async_trait]
impl Geocoder for ChainedGeocoder {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Location> {
        for geocoder in &self.geocoders {
            match geocoder.geocode(address).await {
                Ok(location) => {
                    debug!(provider = geocoder.name(), "Resolved by chain member");
                    return Ok(location);
                }
                Err(GeocodeError::NotFound) => continue,
                Err(e) => {
                    warn!(provider = geocoder.name(), error = %e, "Chain member failed");
                    return Err(e);
                }
            }
        }
        Err(GeocodeError::NotFound)
    }

    #[instrument(skip(self))]
    async fn reverse_geocode(&self, lat: f64, lng: f64) -> Result<Address> {
        for geocoder in &self.geocoders {
            match geocoder.reverse_geocode(lat, lng).await {
                Ok(address) => {
                    debug!(provider = geocoder.name(), "Resolved by chain member");
                    return Ok(address);
                }
                Err(GeocodeError::NotFound) => continue,
                Err(e) => {
                    warn!(provider = geocoder.name(), error = %e, "Chain member failed");
                    return Err(e);
                }
            }
        }
        Err(GeocodeError::NotFound)
    }

    fn name(&self) -> &str {
        "chained"
    }
}
