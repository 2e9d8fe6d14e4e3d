//! In-memory geocoder backed by lookup tables.
//!
//! Useful as a local override layer, in a fallback chain, and as a stand-in
//! provider in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, instrument};

use geocoder_core::error::{GeocodeError, Result};
use geocoder_core::traits::Geocoder;
use geocoder_core::types::{Address, Location};

/// In-memory geocoder.
///
/// Forward lookups match the address string exactly. Reverse lookups match
/// the coordinate pair exactly. Anything else is [`GeocodeError::NotFound`].
///
/// Both tables can be edited while the geocoder is shared.
#[derive(Debug, Default)]
pub struct DataGeocoder {
    /// Forward table: address → location
    locations: RwLock<HashMap<String, Location>>,
    /// Reverse table: coordinate bits → address
    addresses: RwLock<HashMap<(u64, u64), Address>>,
}

impl DataGeocoder {
    /// Creates an empty geocoder that answers NotFound to everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a geocoder from forward and reverse tables.
    pub fn from_tables<F, R, A>(forward: F, reverse: R) -> Self
    where
        F: IntoIterator<Item = (String, Location)>,
        R: IntoIterator<Item = (Location, A)>,
        A: Into<Address>,
    {
        let geocoder = Self::new();
        {
            let mut locations = geocoder.locations.write();
            locations.extend(forward);
        }
        {
            let mut addresses = geocoder.addresses.write();
            addresses.extend(reverse.into_iter().map(|(loc, addr)| (loc.bits(), addr.into())));
        }
        geocoder
    }

    /// Adds a forward mapping (builder style).
    pub fn with_location(self, address: impl Into<String>, location: Location) -> Self {
        self.insert_location(address, location);
        self
    }

    /// Adds a reverse mapping (builder style).
    pub fn with_address(self, location: Location, address: impl Into<Address>) -> Self {
        self.insert_address(location, address);
        self
    }

    /// Inserts or replaces a forward mapping.
    pub fn insert_location(&self, address: impl Into<String>, location: Location) {
        self.locations.write().insert(address.into(), location);
    }

    /// Inserts or replaces a reverse mapping.
    pub fn insert_address(&self, location: Location, address: impl Into<Address>) {
        self.addresses.write().insert(location.bits(), address.into());
    }

    /// Removes a forward mapping.
    pub fn remove_location(&self, address: &str) -> Option<Location> {
        self.locations.write().remove(address)
    }

    /// Removes a reverse mapping.
    pub fn remove_address(&self, location: Location) -> Option<Address> {
        self.addresses.write().remove(&location.bits())
    }

    /// Returns the number of forward and reverse mappings.
    pub fn len(&self) -> (usize, usize) {
        (self.locations.read().len(), self.addresses.read().len())
    }

    /// Returns true if both tables are empty.
    pub fn is_empty(&self) -> bool {
        self.locations.read().is_empty() && self.addresses.read().is_empty()
    }
}

#[async_trait]
impl Geocoder for DataGeocoder {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Location> {
        let found = self.locations.read().get(address).copied();
        match found {
            Some(location) => Ok(location),
            None => {
                debug!(address, "No forward mapping");
                Err(GeocodeError::NotFound)
            }
        }
    }

    #[instrument(skip(self))]
    async fn reverse_geocode(&self, lat: f64, lng: f64) -> Result<Address> {
        let key = Location::new(lat, lng).bits();
        let found = self.addresses.read().get(&key).cloned();
        found.ok_or_else(|| {
            debug!(lat, lng, "No reverse mapping");
            GeocodeError::NotFound
        })
    }

    fn name(&self) -> &str {
        "data"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::block_on;

    fn melbourne() -> DataGeocoder {
        DataGeocoder::new()
            .with_location("Melbourne VIC", Location::new(-37.814107, 144.96328))
            .with_address(
                Location::new(-37.816742, 144.964463),
                "Melbourne VIC 3000, Australia",
            )
    }

    #[test]
    fn test_geocode_known_address() {
        let geocoder = melbourne();
        let location = block_on(geocoder.geocode("Melbourne VIC")).unwrap();
        assert_eq!(location, Location::new(-37.814107, 144.96328));
    }

    #[test]
    fn test_geocode_is_exact_match() {
        let geocoder = melbourne();
        assert!(block_on(geocoder.geocode("melbourne vic")).unwrap_err().is_not_found());
        assert!(block_on(geocoder.geocode("")).unwrap_err().is_not_found());
    }

    #[test]
    fn test_reverse_geocode_known_pair() {
        let geocoder = melbourne();
        let address = block_on(geocoder.reverse_geocode(-37.816742, 144.964463)).unwrap();
        assert!(address.as_str().ends_with("Melbourne VIC 3000, Australia"));
    }

    #[test]
    fn test_reverse_geocode_mismatched_longitude() {
        let geocoder = melbourne();
        let err = block_on(geocoder.reverse_geocode(-37.816742, 164.964463)).unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_tables_are_editable() {
        let geocoder = DataGeocoder::new();
        assert!(geocoder.is_empty());
        assert!(geocoder.geocode("Austin,TX").await.unwrap_err().is_not_found());

        geocoder.insert_location("Austin,TX", Location::new(1.0, 2.0));
        assert_eq!(geocoder.geocode("Austin,TX").await.unwrap(), Location::new(1.0, 2.0));

        assert_eq!(geocoder.remove_location("Austin,TX"), Some(Location::new(1.0, 2.0)));
        assert!(geocoder.geocode("Austin,TX").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_from_tables() {
        let geocoder = DataGeocoder::from_tables(
            vec![("Austin,TX".to_string(), Location::new(1.0, 2.0))],
            vec![(Location::new(1.0, 2.0), "Austin, TX, USA")],
        );
        assert_eq!(geocoder.len(), (1, 1));
        assert_eq!(
            geocoder.reverse_geocode(1.0, 2.0).await.unwrap(),
            Address::from("Austin, TX, USA")
        );
        assert_eq!(
            geocoder.remove_address(Location::new(1.0, 2.0)),
            Some(Address::from("Austin, TX, USA"))
        );
    }
}
