//! Tool input types
//!
//! One struct per tool shape, decoded with serde and described with a JSON
//! Schema derived by schemars. Unknown fields are ignored. Validation into
//! domain values happens in the accessor methods so that every argument
//! problem surfaces as [`ApplicationError::InvalidArgument`] before any
//! upstream call is made.

use domain::{BoundingBox, DomainError, GeoLocation, RoutingProfile};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::error::ApplicationError;

/// Result limit used when none (or zero) is given
pub const DEFAULT_LIMIT: u32 = 10;

fn location(latitude: f64, longitude: f64) -> Result<GeoLocation, ApplicationError> {
    GeoLocation::new(latitude, longitude).map_err(|e| DomainError::from(e).into())
}

fn radius(radius: f64) -> Result<f64, ApplicationError> {
    if radius.is_finite() && radius > 0.0 {
        Ok(radius)
    } else {
        Err(ApplicationError::InvalidArgument(format!(
            "radius must be a positive number of meters, got {radius}"
        )))
    }
}

/// Input for the geocode_address tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GeocodeArgs {
    /// The address or place name to geocode
    pub address: String,
}

impl GeocodeArgs {
    /// The trimmed, non-empty address
    pub fn address(&self) -> Result<&str, ApplicationError> {
        let address = self.address.trim();
        if address.is_empty() {
            return Err(ApplicationError::InvalidArgument(
                "address must not be empty".to_string(),
            ));
        }
        Ok(address)
    }
}

/// Input for the reverse_geocode tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ReverseGeocodeArgs {
    /// The latitude coordinate
    pub latitude: f64,
    /// The longitude coordinate
    pub longitude: f64,
}

impl ReverseGeocodeArgs {
    /// The validated coordinate
    pub fn location(&self) -> Result<GeoLocation, ApplicationError> {
        location(self.latitude, self.longitude)
    }
}

/// Input for the find_nearby_places tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FindNearbyArgs {
    /// The latitude coordinate
    pub latitude: f64,
    /// The longitude coordinate
    pub longitude: f64,
    /// Search radius in meters
    pub radius: f64,
    /// Amenity categories to search for (e.g. restaurant, cafe, school); all amenities when empty
    #[serde(default)]
    pub categories: Vec<String>,
    /// Maximum number of results to return (default: 10)
    #[serde(default)]
    pub limit: Option<u32>,
}

impl FindNearbyArgs {
    /// The validated search center
    pub fn location(&self) -> Result<GeoLocation, ApplicationError> {
        location(self.latitude, self.longitude)
    }

    /// The validated radius in meters
    pub fn radius(&self) -> Result<f64, ApplicationError> {
        radius(self.radius)
    }

    /// The result limit, falling back to [`DEFAULT_LIMIT`]
    #[must_use]
    pub fn limit(&self) -> u32 {
        match self.limit {
            None | Some(0) => DEFAULT_LIMIT,
            Some(limit) => limit,
        }
    }
}

/// Input for the get_route tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetRouteArgs {
    /// Latitude of the start point
    pub from_lat: f64,
    /// Longitude of the start point
    pub from_lon: f64,
    /// Latitude of the destination
    pub to_lat: f64,
    /// Longitude of the destination
    pub to_lon: f64,
    /// The transportation mode: "car", "bicycle" or "foot" (default: "car")
    #[serde(default)]
    pub mode: Option<String>,
}

impl GetRouteArgs {
    /// The validated start point
    pub fn origin(&self) -> Result<GeoLocation, ApplicationError> {
        location(self.from_lat, self.from_lon)
    }

    /// The validated destination
    pub fn destination(&self) -> Result<GeoLocation, ApplicationError> {
        location(self.to_lat, self.to_lon)
    }

    /// The routing profile; unknown modes fall back to car
    #[must_use]
    pub fn profile(&self) -> RoutingProfile {
        self.mode
            .as_deref()
            .map_or(RoutingProfile::Car, RoutingProfile::from_mode)
    }
}

/// Input for the search_category tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchCategoryArgs {
    /// The tag filter to search for (e.g. amenity=restaurant)
    pub category: String,
    /// Southern edge of the bounding box
    pub min_lat: f64,
    /// Western edge of the bounding box
    pub min_lon: f64,
    /// Northern edge of the bounding box
    pub max_lat: f64,
    /// Eastern edge of the bounding box
    pub max_lon: f64,
}

impl SearchCategoryArgs {
    /// The trimmed, non-empty tag filter
    pub fn category(&self) -> Result<&str, ApplicationError> {
        let category = self.category.trim();
        if category.is_empty() {
            return Err(ApplicationError::InvalidArgument(
                "category must not be empty".to_string(),
            ));
        }
        Ok(category)
    }

    /// The validated bounding box
    pub fn bounding_box(&self) -> Result<BoundingBox, ApplicationError> {
        BoundingBox::new(self.min_lat, self.min_lon, self.max_lat, self.max_lon).map_err(|_| {
            ApplicationError::InvalidArgument(format!(
                "invalid bounding box ({},{},{},{}): corners must be valid coordinates with min <= max",
                self.min_lat, self.min_lon, self.max_lat, self.max_lon
            ))
        })
    }
}

/// Input for the fixed-category search tools (find_schools, find_parking, ...)
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FindPoiArgs {
    /// The latitude coordinate
    pub latitude: f64,
    /// The longitude coordinate
    pub longitude: f64,
    /// Search radius in meters
    pub radius: f64,
}

impl FindPoiArgs {
    /// The validated search center
    pub fn location(&self) -> Result<GeoLocation, ApplicationError> {
        location(self.latitude, self.longitude)
    }

    /// The validated radius in meters
    pub fn radius(&self) -> Result<f64, ApplicationError> {
        radius(self.radius)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_nearby_limit_defaults() {
        let args: FindNearbyArgs =
            serde_json::from_value(json!({"latitude": 52.5, "longitude": 13.4, "radius": 500}))
                .unwrap();
        assert_eq!(args.limit(), DEFAULT_LIMIT);
        assert!(args.categories.is_empty());

        let args: FindNearbyArgs = serde_json::from_value(
            json!({"latitude": 52.5, "longitude": 13.4, "radius": 500, "limit": 0}),
        )
        .unwrap();
        assert_eq!(args.limit(), DEFAULT_LIMIT);

        let args: FindNearbyArgs = serde_json::from_value(
            json!({"latitude": 52.5, "longitude": 13.4, "radius": 500, "limit": 3}),
        )
        .unwrap();
        assert_eq!(args.limit(), 3);
    }

    #[test]
    fn test_radius_validation() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(radius(bad), Err(ApplicationError::InvalidArgument(_))),
                "radius {bad} accepted"
            );
        }
        assert_eq!(radius(250.0).unwrap(), 250.0);
    }

    #[test]
    fn test_route_profile_defaults_to_car() {
        let args: GetRouteArgs = serde_json::from_value(
            json!({"from_lat": 52.5, "from_lon": 13.3, "to_lat": 52.6, "to_lon": 13.4}),
        )
        .unwrap();
        assert_eq!(args.profile(), RoutingProfile::Car);

        let args = GetRouteArgs {
            mode: Some("walking".to_string()),
            ..args
        };
        assert_eq!(args.profile(), RoutingProfile::Foot);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let args: GeocodeArgs =
            serde_json::from_value(json!({"address": "Berlin", "country": "DE"})).unwrap();
        assert_eq!(args.address().unwrap(), "Berlin");
    }

    #[test]
    fn test_blank_address_rejected() {
        let args = GeocodeArgs {
            address: "   ".to_string(),
        };
        assert!(matches!(
            args.address(),
            Err(ApplicationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_out_of_range_location_rejected() {
        let args = ReverseGeocodeArgs {
            latitude: 95.0,
            longitude: 13.4,
        };
        assert!(matches!(
            args.location(),
            Err(ApplicationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_inverted_bounding_box_rejected() {
        let args = SearchCategoryArgs {
            category: "amenity=restaurant".to_string(),
            min_lat: 52.6,
            min_lon: 13.3,
            max_lat: 52.5,
            max_lon: 13.4,
        };
        let err = args.bounding_box().unwrap_err();
        assert!(err.to_string().contains("invalid bounding box"));
    }
}
