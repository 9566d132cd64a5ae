//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::value_objects::{BoundingBox, GeoLocation, RoutingProfile};
use proptest::prelude::*;

// ============================================================================
// GeoLocation Property Tests
// ============================================================================

mod geo_location_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_coordinates_create_location(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let result = GeoLocation::new(lat, lon);
            prop_assert!(result.is_ok());

            let loc = result.unwrap();
            prop_assert!((loc.latitude() - lat).abs() < f64::EPSILON);
            prop_assert!((loc.longitude() - lon).abs() < f64::EPSILON);
        }

        #[test]
        fn invalid_latitude_rejected(
            lat in prop_oneof![
                (-1000.0f64..-90.1f64),
                (90.1f64..1000.0f64)
            ],
            lon in -180.0f64..=180.0f64
        ) {
            prop_assert!(GeoLocation::new(lat, lon).is_err());
        }

        #[test]
        fn invalid_longitude_rejected(
            lat in -90.0f64..=90.0f64,
            lon in prop_oneof![
                (-1000.0f64..-180.1f64),
                (180.1f64..1000.0f64)
            ]
        ) {
            prop_assert!(GeoLocation::new(lat, lon).is_err());
        }

        #[test]
        fn lon_lat_pair_round_trips_through_parse(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let loc = GeoLocation::new(lat, lon).unwrap();
            let pair = loc.lon_lat_pair();
            let (first, second) = pair.split_once(',').unwrap();
            let parsed_lon: f64 = first.parse().unwrap();
            let parsed_lat: f64 = second.parse().unwrap();
            prop_assert!((parsed_lon - lon).abs() < 1e-6);
            prop_assert!((parsed_lat - lat).abs() < 1e-6);
        }
    }
}

// ============================================================================
// BoundingBox Property Tests
// ============================================================================

mod bounding_box_tests {
    use super::*;

    proptest! {
        #[test]
        fn ordered_corners_accepted_and_render_in_order(
            lat_a in -90.0f64..=90.0f64,
            lat_b in -90.0f64..=90.0f64,
            lon_a in -180.0f64..=180.0f64,
            lon_b in -180.0f64..=180.0f64
        ) {
            let bbox = BoundingBox::new(
                lat_a.min(lat_b),
                lon_a.min(lon_b),
                lat_a.max(lat_b),
                lon_a.max(lon_b),
            );
            prop_assert!(bbox.is_ok());

            let rendered = bbox.unwrap().to_string();
            let parts: Vec<f64> = rendered.split(',').map(|p| p.parse().unwrap()).collect();
            prop_assert_eq!(parts.len(), 4);
            prop_assert!(parts[0] <= parts[2]);
            prop_assert!(parts[1] <= parts[3]);
        }
    }
}

// ============================================================================
// RoutingProfile Property Tests
// ============================================================================

mod routing_profile_tests {
    use super::*;

    proptest! {
        #[test]
        fn unknown_modes_fall_back_to_car(mode in "[a-z]{0,12}") {
            let profile = RoutingProfile::from_mode(&mode);
            let known = matches!(mode.as_str(), "bike" | "bicycle" | "foot" | "walking");
            if !known {
                prop_assert_eq!(profile, RoutingProfile::Car);
            }
        }
    }
}
