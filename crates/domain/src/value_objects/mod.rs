//! Value Objects - Immutable, identity-less domain primitives

mod bounding_box;
mod geo_location;
mod routing_profile;

pub use bounding_box::BoundingBox;
pub use geo_location::{GeoLocation, InvalidCoordinates};
pub use routing_profile::RoutingProfile;
