//! Location and address types.

use std::fmt;

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════════
// LOCATION
// ═══════════════════════════════════════════════════════════════════════════════

/// A geographic position in degrees.
///
/// Equality is exact value equality on both coordinates; no rounding is
/// applied anywhere in this workspace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

impl Location {
    /// Creates a location from a latitude/longitude pair.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns a hashable identity for this exact coordinate pair.
    ///
    /// `-0.0` and `0.0` compare equal as floats, so both map to the same bits.
    pub fn bits(&self) -> (u64, u64) {
        (canonical_bits(self.lat), canonical_bits(self.lng))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

impl From<(f64, f64)> for Location {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

pub(crate) fn canonical_bits(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ADDRESS
// ═══════════════════════════════════════════════════════════════════════════════

/// A human-readable postal or place description.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Creates an address from any string-like value.
    pub fn new(formatted: impl Into<String>) -> Self {
        Self(formatted.into())
    }

    /// Returns the address text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the address, returning the text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Address {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_exact_equality() {
        let a = Location::new(-37.814107, 144.96328);
        assert_eq!(a, Location::new(-37.814107, 144.96328));
        assert_ne!(a, Location::new(-37.814107, 144.963281));
    }

    #[test]
    fn test_location_bits_fold_signed_zero() {
        assert_eq!(Location::new(0.0, -0.0).bits(), Location::new(-0.0, 0.0).bits());
        assert_ne!(Location::new(1.0, 2.0).bits(), Location::new(2.0, 1.0).bits());
    }

    #[test]
    fn test_location_serde() {
        let loc = Location::new(1.5, -2.25);
        let json = serde_json::to_string(&loc).unwrap();
        assert_eq!(json, r#"{"lat":1.5,"lng":-2.25}"#);
        let back: Location = serde_json::from_str(&json).unwrap();
        assert_eq!(back, loc);
    }

    #[test]
    fn test_address_is_transparent_string() {
        let addr = Address::from("Melbourne VIC 3000, Australia");
        assert_eq!(addr.as_str(), "Melbourne VIC 3000, Australia");
        assert_eq!(
            serde_json::to_string(&addr).unwrap(),
            r#""Melbourne VIC 3000, Australia""#
        );
        assert_eq!(addr.to_string(), "Melbourne VIC 3000, Australia");
    }
}
