//! Entities returned by the upstream geo services

mod feature;
mod geocode;
mod route;

pub use feature::{CompositeElement, FeatureElement, FeatureKind, GeoPoint, NodeElement};
pub use geocode::{GeocodeResult, ReverseGeocodeResult};
pub use route::{ROUTE_OK, Route, RouteLeg, RouteResponse, Waypoint};
