//! OSM adapter - Implements GeoGatewayPort using integration_osm

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::GeoGatewayPort;
use application::request_context::RequestContext;
use async_trait::async_trait;
use domain::{
    FeatureElement, GeoLocation, GeocodeResult, ReverseGeocodeResult, RouteResponse,
    RoutingProfile,
};
use integration_osm::{FeatureQuery, OsmClient, OsmConfig, OsmError};
use tracing::{debug, instrument};

/// Adapter for Nominatim, Overpass and OSRM through one rate-limited client
#[derive(Debug, Clone)]
pub struct OsmGatewayAdapter {
    client: Arc<OsmClient>,
}

impl OsmGatewayAdapter {
    /// Wrap an existing client
    #[must_use]
    pub const fn new(client: Arc<OsmClient>) -> Self {
        Self { client }
    }

    /// Create a new adapter with its own client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn from_config(config: &OsmConfig) -> Result<Self, ApplicationError> {
        let client = OsmClient::new(config).map_err(map_error)?;
        Ok(Self::new(Arc::new(client)))
    }
}

/// Convert an upstream error to the application taxonomy
fn map_error(err: OsmError) -> ApplicationError {
    match err {
        OsmError::Canceled => ApplicationError::Canceled,
        OsmError::UpstreamUnavailable { .. } => {
            ApplicationError::UpstreamUnavailable(err.to_string())
        },
        OsmError::UpstreamStatus { status, .. } => ApplicationError::UpstreamStatus {
            status,
            message: err.to_string(),
        },
        OsmError::Decode { .. } => ApplicationError::Decode(err.to_string()),
        OsmError::Configuration(message) => ApplicationError::Internal(message),
    }
}

#[async_trait]
impl GeoGatewayPort for OsmGatewayAdapter {
    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    async fn geocode(
        &self,
        ctx: &RequestContext,
        address: &str,
    ) -> Result<Vec<GeocodeResult>, ApplicationError> {
        let results = self
            .client
            .geocode(address, ctx.cancellation())
            .await
            .map_err(map_error)?;
        debug!(count = results.len(), "Geocoding finished");
        Ok(results)
    }

    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    async fn reverse_geocode(
        &self,
        ctx: &RequestContext,
        location: GeoLocation,
    ) -> Result<ReverseGeocodeResult, ApplicationError> {
        self.client
            .reverse_geocode(location, ctx.cancellation())
            .await
            .map_err(map_error)
    }

    #[instrument(skip(self, ctx, query), fields(request_id = %ctx.request_id()))]
    async fn feature_query(
        &self,
        ctx: &RequestContext,
        query: &FeatureQuery,
    ) -> Result<Vec<FeatureElement>, ApplicationError> {
        let elements = self
            .client
            .run_query(query, ctx.cancellation())
            .await
            .map_err(map_error)?;
        debug!(count = elements.len(), "Feature query finished");
        Ok(elements)
    }

    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    async fn route(
        &self,
        ctx: &RequestContext,
        from: GeoLocation,
        to: GeoLocation,
        profile: RoutingProfile,
    ) -> Result<RouteResponse, ApplicationError> {
        self.client
            .route(from, to, profile, ctx.cancellation())
            .await
            .map_err(map_error)
    }
}
