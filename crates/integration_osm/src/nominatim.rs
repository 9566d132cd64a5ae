//! Nominatim geocoding
//!
//! Forward search (`/search`) returns a JSON array of places; reverse lookup
//! (`/reverse`) returns a single object. Coordinates and bounding boxes come
//! back as decimal strings and are parsed here.

use std::collections::BTreeMap;

use domain::{BoundingBox, GeoLocation, GeocodeResult, ReverseGeocodeResult};
use serde::Deserialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::client::{OsmClient, decode_json, join_path};
use crate::error::{OsmError, Upstream};

const UPSTREAM: Upstream = Upstream::Geocoding;

impl OsmClient {
    /// Convert an address or place name into matching places
    ///
    /// An empty list means nothing matched; it is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is canceled, the service is
    /// unreachable, answers with a non-200 status, or sends a malformed body.
    #[instrument(skip(self, cancel))]
    pub async fn geocode(
        &self,
        address: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<GeocodeResult>, OsmError> {
        let url = join_path(&self.config().nominatim_base_url, "/search");
        let request = self
            .http()
            .get(&url)
            .query(&[("q", address), ("format", "json")]);

        debug!(%address, "Geocoding address");
        let body = self.execute(UPSTREAM, request, cancel).await?;
        let results = parse_search_response(&body)?;
        debug!(count = results.len(), "Geocoding results");
        Ok(results)
    }

    /// Convert a coordinate pair into a structured address
    ///
    /// # Errors
    ///
    /// Same failure modes as [`OsmClient::geocode`]. A location with no
    /// address (Nominatim answers `{"error": ...}`) is a decode error.
    #[instrument(skip(self, cancel), fields(location = %location))]
    pub async fn reverse_geocode(
        &self,
        location: GeoLocation,
        cancel: &CancellationToken,
    ) -> Result<ReverseGeocodeResult, OsmError> {
        let url = join_path(&self.config().nominatim_base_url, "/reverse");
        let request = self.http().get(&url).query(&[
            ("lat", location.latitude_param()),
            ("lon", location.longitude_param()),
            ("format", "json".to_string()),
        ]);

        debug!("Reverse geocoding");
        let body = self.execute(UPSTREAM, request, cancel).await?;
        parse_reverse_response(&body)
    }
}

/// Parse the body of a `/search` response
pub(crate) fn parse_search_response(body: &str) -> Result<Vec<GeocodeResult>, OsmError> {
    let raw: Vec<RawPlace> = decode_json(UPSTREAM, body)?;
    raw.into_iter().map(convert_place).collect()
}

/// Parse the body of a `/reverse` response
///
/// Nominatim answers `{"error": ...}` when nothing lies at the location, so
/// that key is checked before the body is decoded as a place.
pub(crate) fn parse_reverse_response(body: &str) -> Result<ReverseGeocodeResult, OsmError> {
    let value: Value = decode_json(UPSTREAM, body)?;
    if let Some(error) = value.get("error") {
        let reason = error.as_str().map_or_else(|| error.to_string(), str::to_string);
        return Err(OsmError::decode(UPSTREAM, format!("no address found: {reason}")));
    }

    let raw: RawPlace = serde_json::from_value(value)
        .map_err(|e| OsmError::decode(UPSTREAM, e.to_string()))?;
    Ok(ReverseGeocodeResult {
        place_id: raw.place_id,
        latitude: parse_coordinate("lat", &raw.lat)?,
        longitude: parse_coordinate("lon", &raw.lon)?,
        bounding_box: raw.bounding_box.as_deref().map(parse_bounding_box).transpose()?,
        licence: raw.licence,
        osm_type: raw.osm_type,
        osm_id: raw.osm_id,
        display_name: raw.display_name,
        address: raw.address,
    })
}

fn convert_place(raw: RawPlace) -> Result<GeocodeResult, OsmError> {
    Ok(GeocodeResult {
        place_id: raw.place_id,
        latitude: parse_coordinate("lat", &raw.lat)?,
        longitude: parse_coordinate("lon", &raw.lon)?,
        bounding_box: raw.bounding_box.as_deref().map(parse_bounding_box).transpose()?,
        licence: raw.licence,
        osm_type: raw.osm_type,
        osm_id: raw.osm_id,
        display_name: raw.display_name,
        class: raw.class,
        kind: raw.kind,
        importance: raw.importance,
    })
}

fn parse_coordinate(field: &str, value: &str) -> Result<f64, OsmError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| OsmError::decode(UPSTREAM, format!("invalid {field} '{value}'")))
}

/// Nominatim orders the box as `[south, north, west, east]`
///
/// The box is optional, but when present it must be well formed: a bad box
/// fails the whole response with a decode error, including any other matches
/// that decoded cleanly.
fn parse_bounding_box(values: &[String]) -> Result<BoundingBox, OsmError> {
    let [south, north, west, east] = values else {
        return Err(OsmError::decode(
            UPSTREAM,
            format!("boundingbox must have 4 entries, got {}", values.len()),
        ));
    };

    BoundingBox::new(
        parse_coordinate("boundingbox", south)?,
        parse_coordinate("boundingbox", west)?,
        parse_coordinate("boundingbox", north)?,
        parse_coordinate("boundingbox", east)?,
    )
    .map_err(|e| OsmError::decode(UPSTREAM, e.to_string()))
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawPlace {
    #[serde(default)]
    place_id: i64,
    licence: Option<String>,
    osm_type: Option<String>,
    osm_id: Option<i64>,
    #[serde(rename = "boundingbox")]
    bounding_box: Option<Vec<String>>,
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: String,
    class: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    importance: Option<f64>,
    #[serde(default)]
    address: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_response() {
        let json = r#"[{"place_id":1001, "lat":"52.517", "lon":"13.388", "display_name":"Berlin, Germany"}]"#;
        let results = parse_search_response(json).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].display_name, "Berlin, Germany");
        assert!((results[0].latitude - 52.517).abs() < 1e-9);
        assert!((results[0].longitude - 13.388).abs() < 1e-9);
        assert!(results[0].bounding_box.is_none());
    }

    #[test]
    fn test_parse_full_search_result() {
        let json = r#"[{
            "place_id": 132385435,
            "licence": "Data © OpenStreetMap contributors, ODbL 1.0.",
            "osm_type": "way",
            "osm_id": 518071791,
            "boundingbox": ["52.5161", "52.5164", "13.3775", "13.3779"],
            "lat": "52.51627",
            "lon": "13.37770",
            "display_name": "Brandenburger Tor, Pariser Platz, Berlin",
            "class": "tourism",
            "type": "attraction",
            "importance": 0.73
        }]"#;
        let result = &parse_search_response(json).unwrap()[0];
        assert_eq!(result.osm_type.as_deref(), Some("way"));
        assert_eq!(result.kind.as_deref(), Some("attraction"));
        let bbox = result.bounding_box.unwrap();
        assert!((bbox.min_lat - 52.5161).abs() < 1e-9);
        assert!((bbox.max_lat - 52.5164).abs() < 1e-9);
        assert!((bbox.min_lon - 13.3775).abs() < 1e-9);
        assert!((bbox.max_lon - 13.3779).abs() < 1e-9);
    }

    #[test]
    fn test_parse_empty_search_response() {
        assert!(parse_search_response("[]").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_latitude_is_decode_error() {
        let json = r#"[{"place_id":1, "lat":"north", "lon":"13.388", "display_name":"x"}]"#;
        let err = parse_search_response(json).unwrap_err();
        assert!(matches!(err, OsmError::Decode { .. }));
        assert!(err.to_string().contains("invalid lat 'north'"));
    }

    #[test]
    fn test_short_bounding_box_is_decode_error() {
        let json = r#"[{"place_id":1, "lat":"1", "lon":"2", "boundingbox":["1","2"]}]"#;
        assert!(matches!(
            parse_search_response(json),
            Err(OsmError::Decode { .. })
        ));
    }

    #[test]
    fn test_bad_bounding_box_fails_every_match() {
        let json = r#"[
            {"place_id":1, "lat":"1", "lon":"2"},
            {"place_id":2, "lat":"3", "lon":"4", "boundingbox":["3","2","4","5"]}
        ]"#;
        let err = parse_search_response(json).unwrap_err();
        assert!(matches!(err, OsmError::Decode { .. }));
    }

    #[test]
    fn test_object_instead_of_array_is_decode_error() {
        let json = r#"{"place_id":1, "lat":"1", "lon":"2"}"#;
        assert!(matches!(
            parse_search_response(json),
            Err(OsmError::Decode { .. })
        ));
    }

    #[test]
    fn test_parse_reverse_response() {
        let json = r#"{
            "place_id": 1001,
            "lat": "52.517",
            "lon": "13.388",
            "display_name": "Brandenburg Gate, Berlin",
            "address": {"road": "Pariser Platz", "city": "Berlin", "postcode": "10117"}
        }"#;
        let result = parse_reverse_response(json).unwrap();
        assert_eq!(result.display_name, "Brandenburg Gate, Berlin");
        assert_eq!(result.component("road"), Some("Pariser Platz"));
        assert_eq!(result.component("postcode"), Some("10117"));
    }

    #[test]
    fn test_parse_reverse_not_found() {
        let err = parse_reverse_response(r#"{"error":"Unable to geocode"}"#).unwrap_err();
        assert!(err.to_string().contains("Unable to geocode"));
    }

    #[test]
    fn test_reverse_missing_field_names_the_field() {
        let json = r#"{"place_id":1, "lon":"13.4", "display_name":"x"}"#;
        let err = parse_reverse_response(json).unwrap_err();
        assert!(matches!(err, OsmError::Decode { .. }));
        assert!(err.to_string().contains("missing field `lat`"), "got: {err}");
    }

    #[test]
    fn test_reverse_malformed_latitude_is_decode_error() {
        let json = r#"{"place_id":1, "lat":"north", "lon":"13.4", "display_name":"x"}"#;
        let err = parse_reverse_response(json).unwrap_err();
        assert!(err.to_string().contains("invalid lat 'north'"));
    }
}
