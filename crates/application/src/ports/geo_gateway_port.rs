//! Geospatial gateway port
//!
//! Defines the interface the tool layer uses to reach the geocoding, feature
//! query and routing services. The infrastructure layer implements it on top
//! of the rate-limited OpenStreetMap client.

use async_trait::async_trait;
use domain::{
    FeatureElement, GeoLocation, GeocodeResult, ReverseGeocodeResult, RouteResponse,
    RoutingProfile,
};
use integration_osm::FeatureQuery;
#[cfg(test)]
use mockall::automock;

use crate::{error::ApplicationError, request_context::RequestContext};

/// Port for geocoding, feature queries and routing
///
/// Implementations must honour `ctx.cancellation()`: a canceled context
/// resolves to [`ApplicationError::Canceled`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeoGatewayPort: Send + Sync {
    /// Resolve an address or place name to candidate places
    async fn geocode(
        &self,
        ctx: &RequestContext,
        address: &str,
    ) -> Result<Vec<GeocodeResult>, ApplicationError>;

    /// Resolve a coordinate to the nearest address
    async fn reverse_geocode(
        &self,
        ctx: &RequestContext,
        location: GeoLocation,
    ) -> Result<ReverseGeocodeResult, ApplicationError>;

    /// Run a filter query and return the matching map elements
    async fn feature_query(
        &self,
        ctx: &RequestContext,
        query: &FeatureQuery,
    ) -> Result<Vec<FeatureElement>, ApplicationError>;

    /// Compute a route between two coordinates
    async fn route(
        &self,
        ctx: &RequestContext,
        from: GeoLocation,
        to: GeoLocation,
        profile: RoutingProfile,
    ) -> Result<RouteResponse, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn GeoGatewayPort>();
    }

    #[test]
    fn mock_can_be_boxed_as_port() {
        let mock = MockGeoGatewayPort::new();
        let _port: Box<dyn GeoGatewayPort> = Box::new(mock);
    }
}
