//! Tool dispatch
//!
//! Turns a tool name plus JSON arguments into a call on the
//! [`GeoGatewayPort`] and wraps whatever comes back in a [`ToolResult`].
//! [`ToolDispatcher::call`] never fails: argument problems, upstream
//! failures and cancellation all come back as error-flagged results.

mod args;
mod result;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use integration_osm::{FeatureQuery, TagFilter};
use schemars::schema_for;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

pub use args::{
    DEFAULT_LIMIT, FindNearbyArgs, FindPoiArgs, GeocodeArgs, GetRouteArgs, ReverseGeocodeArgs,
    SearchCategoryArgs,
};
pub use result::{ToolContent, ToolResult};

use crate::{error::ApplicationError, ports::GeoGatewayPort, request_context::RequestContext};

/// The tools exposed by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    /// Address or place name to coordinates
    GeocodeAddress,
    /// Coordinates to address
    ReverseGeocode,
    /// Amenities around a point
    FindNearbyPlaces,
    /// Route between two points
    GetRoute,
    /// Arbitrary tag filter inside a bounding box
    SearchCategory,
    /// Schools around a point
    FindSchools,
    /// EV charging stations around a point
    FindEvChargingStations,
    /// Parking around a point
    FindParking,
}

impl Tool {
    /// Every tool, in listing order
    pub const ALL: [Self; 8] = [
        Self::GeocodeAddress,
        Self::ReverseGeocode,
        Self::FindNearbyPlaces,
        Self::GetRoute,
        Self::SearchCategory,
        Self::FindSchools,
        Self::FindEvChargingStations,
        Self::FindParking,
    ];

    /// Wire name of the tool
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GeocodeAddress => "geocode_address",
            Self::ReverseGeocode => "reverse_geocode",
            Self::FindNearbyPlaces => "find_nearby_places",
            Self::GetRoute => "get_route",
            Self::SearchCategory => "search_category",
            Self::FindSchools => "find_schools",
            Self::FindEvChargingStations => "find_ev_charging_stations",
            Self::FindParking => "find_parking",
        }
    }

    /// Human-readable description
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::GeocodeAddress => "Converts an address or place name to coordinates.",
            Self::ReverseGeocode => "Converts coordinates to a human-readable address.",
            Self::FindNearbyPlaces => "Finds points of interest near a location.",
            Self::GetRoute => "Calculates a route between two points.",
            Self::SearchCategory => {
                "Searches for features of a specific category within a bounding box."
            },
            Self::FindSchools => "Finds schools near a location.",
            Self::FindEvChargingStations => "Finds EV charging stations near a location.",
            Self::FindParking => "Finds parking facilities near a location.",
        }
    }

    /// Fixed filter of the preset radius searches
    #[must_use]
    pub const fn preset_filter(self) -> Option<&'static str> {
        match self {
            Self::FindSchools => Some("amenity=school"),
            Self::FindEvChargingStations => Some("amenity=charging_station"),
            Self::FindParking => Some("amenity=parking"),
            _ => None,
        }
    }

    fn input_schema(self) -> Value {
        let schema = match self {
            Self::GeocodeAddress => schema_for!(GeocodeArgs),
            Self::ReverseGeocode => schema_for!(ReverseGeocodeArgs),
            Self::FindNearbyPlaces => schema_for!(FindNearbyArgs),
            Self::GetRoute => schema_for!(GetRouteArgs),
            Self::SearchCategory => schema_for!(SearchCategoryArgs),
            Self::FindSchools | Self::FindEvChargingStations | Self::FindParking => {
                schema_for!(FindPoiArgs)
            },
        };
        schema.to_value()
    }

    /// Name, description and input schema
    #[must_use]
    pub fn definition(self) -> ToolDefinition {
        ToolDefinition {
            name: self.name(),
            description: self.description(),
            input_schema: self.input_schema(),
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = ApplicationError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.name() == name)
            .ok_or_else(|| ApplicationError::InvalidArgument(format!("unknown tool: {name}")))
    }
}

/// Listing entry for a tool
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    /// Wire name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// JSON Schema of the arguments object
    pub input_schema: Value,
}

/// Routes tool calls to the gateway port
pub struct ToolDispatcher {
    gateway: Arc<dyn GeoGatewayPort>,
}

impl fmt::Debug for ToolDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDispatcher").finish_non_exhaustive()
    }
}

impl ToolDispatcher {
    /// Create a dispatcher calling through `gateway`
    #[must_use]
    pub fn new(gateway: Arc<dyn GeoGatewayPort>) -> Self {
        Self { gateway }
    }

    /// Definitions of every tool
    #[must_use]
    pub fn definitions() -> Vec<ToolDefinition> {
        Tool::ALL.into_iter().map(Tool::definition).collect()
    }

    /// Invoke the tool `name` with `arguments`
    ///
    /// `null` arguments are treated as an empty object.
    #[instrument(skip(self, ctx, arguments), fields(request_id = %ctx.request_id()))]
    pub async fn call(&self, ctx: &RequestContext, name: &str, arguments: Value) -> ToolResult {
        let outcome = match name.parse::<Tool>() {
            Ok(tool) => self.dispatch(ctx, tool, arguments).await,
            Err(e) => Err(e),
        };

        outcome.unwrap_or_else(|e| {
            warn!(tool = name, error = %e, "Tool call failed");
            ToolResult::error(e.to_string())
        })
    }

    async fn dispatch(
        &self,
        ctx: &RequestContext,
        tool: Tool,
        arguments: Value,
    ) -> Result<ToolResult, ApplicationError> {
        match tool {
            Tool::GeocodeAddress => {
                let args: GeocodeArgs = decode_args(arguments)?;
                let results = self.gateway.geocode(ctx, args.address()?).await?;
                Ok(ToolResult::json(&results))
            },
            Tool::ReverseGeocode => {
                let args: ReverseGeocodeArgs = decode_args(arguments)?;
                let result = self.gateway.reverse_geocode(ctx, args.location()?).await?;
                Ok(ToolResult::json(&result))
            },
            Tool::FindNearbyPlaces => {
                let args: FindNearbyArgs = decode_args(arguments)?;
                let query = FeatureQuery::around(
                    TagFilter::amenities(args.categories.iter().map(String::as_str)),
                    args.location()?,
                    args.radius()?,
                )
                .with_limit(args.limit());
                self.run_query(ctx, &query).await
            },
            Tool::GetRoute => {
                let args: GetRouteArgs = decode_args(arguments)?;
                let (origin, destination) = (args.origin()?, args.destination()?);
                let response = self
                    .gateway
                    .route(ctx, origin, destination, args.profile())
                    .await?;

                let result = ToolResult::json(&response);
                if response.is_ok() {
                    return Ok(result);
                }
                let detail = response
                    .message
                    .as_deref()
                    .map(|m| format!(": {m}"))
                    .unwrap_or_default();
                warn!(code = %response.code, "Routing service found no route");
                Ok(result.into_error(format!(
                    "Routing service answered {}{detail}",
                    response.code
                )))
            },
            Tool::SearchCategory => {
                let args: SearchCategoryArgs = decode_args(arguments)?;
                let query = FeatureQuery::within(
                    TagFilter::expression(args.category()?),
                    args.bounding_box()?,
                );
                self.run_query(ctx, &query).await
            },
            Tool::FindSchools | Tool::FindEvChargingStations | Tool::FindParking => {
                let args: FindPoiArgs = decode_args(arguments)?;
                let filter = tool.preset_filter().ok_or_else(|| {
                    ApplicationError::Internal(format!("{tool} has no preset filter"))
                })?;
                let query = FeatureQuery::around(
                    TagFilter::expression(filter),
                    args.location()?,
                    args.radius()?,
                );
                self.run_query(ctx, &query).await
            },
        }
    }

    async fn run_query(
        &self,
        ctx: &RequestContext,
        query: &FeatureQuery,
    ) -> Result<ToolResult, ApplicationError> {
        debug!(query = %query, "Running feature query");
        let elements = self.gateway.feature_query(ctx, query).await?;
        Ok(ToolResult::json(&elements))
    }
}

/// Decode tool arguments, treating `null` as `{}`
fn decode_args<T: DeserializeOwned>(arguments: Value) -> Result<T, ApplicationError> {
    let arguments = if arguments.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        arguments
    };
    serde_json::from_value(arguments).map_err(|e| ApplicationError::InvalidArgument(e.to_string()))
}
