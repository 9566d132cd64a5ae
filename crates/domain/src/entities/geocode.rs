//! Geocoding results

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value_objects::{BoundingBox, GeoLocation};

/// A place matched by a forward geocoding query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    /// Upstream place identifier
    pub place_id: i64,
    /// Data licence notice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub licence: Option<String>,
    /// OSM element type (`node`, `way`, `relation`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub osm_type: Option<String>,
    /// OSM element identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub osm_id: Option<i64>,
    /// Extent of the place
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
    /// Latitude of the place
    pub latitude: f64,
    /// Longitude of the place
    pub longitude: f64,
    /// Full human-readable name
    pub display_name: String,
    /// Main classification (e.g. `boundary`, `amenity`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Sub classification (e.g. `administrative`, `cafe`)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Ranking score assigned by the geocoder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<f64>,
}

impl GeocodeResult {
    /// Location of the result, if the coordinates are in range
    #[must_use]
    pub fn location(&self) -> Option<GeoLocation> {
        GeoLocation::new(self.latitude, self.longitude).ok()
    }
}

/// The address found for a coordinate pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReverseGeocodeResult {
    /// Upstream place identifier
    pub place_id: i64,
    /// Data licence notice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub licence: Option<String>,
    /// OSM element type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub osm_type: Option<String>,
    /// OSM element identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub osm_id: Option<i64>,
    /// Latitude of the matched place
    pub latitude: f64,
    /// Longitude of the matched place
    pub longitude: f64,
    /// Full human-readable address
    pub display_name: String,
    /// Structured address parts (`road`, `city`, `postcode`, ...)
    #[serde(default)]
    pub address: BTreeMap<String, String>,
    /// Extent of the matched place
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
}

impl ReverseGeocodeResult {
    /// Look up a single address component
    #[must_use]
    pub fn component(&self, key: &str) -> Option<&str> {
        self.address.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> GeocodeResult {
        GeocodeResult {
            place_id: 1001,
            licence: None,
            osm_type: Some("relation".to_string()),
            osm_id: Some(62422),
            bounding_box: None,
            latitude: 52.517,
            longitude: 13.388,
            display_name: "Berlin, Germany".to_string(),
            class: Some("boundary".to_string()),
            kind: Some("administrative".to_string()),
            importance: Some(0.85),
        }
    }

    #[test]
    fn location_from_result() {
        let location = sample_result().location().expect("in range");
        assert!((location.latitude() - 52.517).abs() < f64::EPSILON);
    }

    #[test]
    fn kind_serializes_as_type() {
        let json = serde_json::to_value(sample_result()).expect("serialize");
        assert_eq!(json["type"], "administrative");
        assert!(json.get("licence").is_none());
    }

    #[test]
    fn reverse_component_lookup() {
        let result = ReverseGeocodeResult {
            place_id: 1,
            licence: None,
            osm_type: None,
            osm_id: None,
            latitude: 52.516,
            longitude: 13.377,
            display_name: "Pariser Platz, Berlin".to_string(),
            address: BTreeMap::from([
                ("city".to_string(), "Berlin".to_string()),
                ("postcode".to_string(), "10117".to_string()),
            ]),
            bounding_box: None,
        };
        assert_eq!(result.component("postcode"), Some("10117"));
        assert_eq!(result.component("road"), None);
    }
}
