//! OSRM routing
//!
//! The profile and both coordinates are encoded in the URL path, longitude
//! first: `/route/v1/{profile}/{lon},{lat};{lon},{lat}`.

use domain::{GeoLocation, RouteResponse, RoutingProfile};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::client::{OsmClient, decode_json, join_path};
use crate::error::{OsmError, Upstream};

const UPSTREAM: Upstream = Upstream::Routing;

impl OsmClient {
    /// Calculate a route between two points
    ///
    /// A response whose `code` is not `"Ok"` is returned as-is: the engine
    /// answered, it just found no route. Check [`RouteResponse::is_ok`].
    ///
    /// # Errors
    ///
    /// Returns an error if the request is canceled, the service is
    /// unreachable, answers with a non-200 status, or sends a malformed body.
    #[instrument(skip(self, cancel), fields(from = %from, to = %to, profile = %profile))]
    pub async fn route(
        &self,
        from: GeoLocation,
        to: GeoLocation,
        profile: RoutingProfile,
        cancel: &CancellationToken,
    ) -> Result<RouteResponse, OsmError> {
        let url = route_url(&self.config().osrm_base_url, profile, from, to);
        debug!(%url, "Requesting route");

        let request = self.http().get(&url);
        let body = self.execute(UPSTREAM, request, cancel).await?;
        let response = parse_route_response(&body)?;

        if !response.is_ok() {
            debug!(code = %response.code, "Routing engine found no route");
        }
        Ok(response)
    }
}

/// Build the route request URL
pub(crate) fn route_url(
    base_url: &str,
    profile: RoutingProfile,
    from: GeoLocation,
    to: GeoLocation,
) -> String {
    join_path(
        base_url,
        &format!(
            "/route/v1/{profile}/{};{}?overview=full&geometries=geojson",
            from.lon_lat_pair(),
            to.lon_lat_pair()
        ),
    )
}

/// Parse a route response, recomputing route totals from the legs
pub(crate) fn parse_route_response(body: &str) -> Result<RouteResponse, OsmError> {
    let mut response: RouteResponse = decode_json(UPSTREAM, body)?;
    response.routes = response
        .routes
        .into_iter()
        .map(domain::Route::with_leg_totals)
        .collect();
    Ok(response)
}
