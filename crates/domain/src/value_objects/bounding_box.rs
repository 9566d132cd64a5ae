//! Bounding box value object

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{GeoLocation, InvalidCoordinates};

/// An axis-aligned latitude/longitude rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Southern edge
    pub min_lat: f64,
    /// Western edge
    pub min_lon: f64,
    /// Northern edge
    pub max_lat: f64,
    /// Eastern edge
    pub max_lon: f64,
}

impl BoundingBox {
    /// Create a bounding box from its south-west and north-east corners
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` if a corner is out of range or the
    /// minimum exceeds the maximum on either axis.
    pub fn new(
        min_lat: f64,
        min_lon: f64,
        max_lat: f64,
        max_lon: f64,
    ) -> Result<Self, InvalidCoordinates> {
        GeoLocation::new(min_lat, min_lon)?;
        GeoLocation::new(max_lat, max_lon)?;
        if min_lat > max_lat || min_lon > max_lon {
            return Err(InvalidCoordinates);
        }
        Ok(Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        })
    }
}

/// Renders `south,west,north,east` with six decimals, the order filter queries expect
impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.6},{:.6},{:.6},{:.6}",
            self.min_lat, self.min_lon, self.max_lat, self.max_lon
        )
    }
}
