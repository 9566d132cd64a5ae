//! Geographic location value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// A WGS84 coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
}

/// Error type for invalid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidCoordinates;

impl fmt::Display for InvalidCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180"
        )
    }
}

impl std::error::Error for InvalidCoordinates {}

impl GeoLocation {
    /// Create a new location with validation
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` if latitude is not in [-90, 90],
    /// longitude is not in [-180, 180], or either value is NaN.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinates);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Latitude with six decimal digits, the precision every upstream receives
    #[must_use]
    pub fn latitude_param(&self) -> String {
        format!("{:.6}", self.latitude)
    }

    /// Longitude with six decimal digits
    #[must_use]
    pub fn longitude_param(&self) -> String {
        format!("{:.6}", self.longitude)
    }

    /// `lon,lat` pair as used in routing URL paths
    #[must_use]
    pub fn lon_lat_pair(&self) -> String {
        format!("{:.6},{:.6}", self.longitude, self.latitude)
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinates() {
        let loc = GeoLocation::new(52.52, 13.405).expect("valid coordinates");
        assert!((loc.latitude() - 52.52).abs() < f64::EPSILON);
        assert!((loc.longitude() - 13.405).abs() < f64::EPSILON);
    }

    #[test]
    fn test_boundary_coordinates() {
        assert!(GeoLocation::new(90.0, 180.0).is_ok());
        assert!(GeoLocation::new(-90.0, -180.0).is_ok());
        assert!(GeoLocation::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_invalid_coordinates() {
        assert!(GeoLocation::new(91.0, 0.0).is_err());
        assert!(GeoLocation::new(0.0, -181.0).is_err());
        assert!(GeoLocation::new(f64::NAN, 0.0).is_err());
        assert!(GeoLocation::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_params_use_six_decimals() {
        let loc = GeoLocation::new(52.517, 13.388).expect("valid");
        assert_eq!(loc.latitude_param(), "52.517000");
        assert_eq!(loc.longitude_param(), "13.388000");
    }

    #[test]
    fn test_lon_lat_pair_puts_longitude_first() {
        let loc = GeoLocation::new(52.5, 13.3).expect("valid");
        assert_eq!(loc.lon_lat_pair(), "13.300000,52.500000");
    }

    #[test]
    fn test_display() {
        let loc = GeoLocation::new(52.52, 13.405).expect("valid");
        assert_eq!(loc.to_string(), "52.520000, 13.405000");
    }
}
