//! Geographic observer location.

use serde::{Deserialize, Serialize};

/// Observer position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude, positive north.
    pub lat: f64,
    /// Longitude, positive east.
    pub lng: f64,
}

/// Location used until (or unless) geolocation resolves: Seoul.
pub const DEFAULT_LOCATION: Location = Location {
    lat: 37.5665,
    lng: 126.9780,
};

impl Location {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both coordinates are finite and within their valid ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl Default for Location {
    fn default() -> Self {
        DEFAULT_LOCATION
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ns = if self.lat >= 0.0 { 'N' } else { 'S' };
        let ew = if self.lng >= 0.0 { 'E' } else { 'W' };
        write!(
            f,
            "{:.2}°{ns} {:.2}°{ew}",
            self.lat.abs(),
            self.lng.abs()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity() {
        assert!(DEFAULT_LOCATION.is_valid());
        assert!(!Location::new(91.0, 0.0).is_valid());
        assert!(!Location::new(0.0, f64::NAN).is_valid());
    }

    #[test]
    fn test_display() {
        assert_eq!(Location::new(-33.86, 151.21).to_string(), "33.86°S 151.21°E");
        assert_eq!(Location::new(40.71, -74.0).to_string(), "40.71°N 74.00°W");
    }
}
