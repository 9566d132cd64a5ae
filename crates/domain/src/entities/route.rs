//! Routing results

use serde::{Deserialize, Serialize};

/// Status code the routing engine uses for success
pub const ROUTE_OK: &str = "Ok";

/// Full answer of a routing request
///
/// A `code` other than [`ROUTE_OK`] is a routing failure (no path, bad
/// coordinates), not a transport failure: the response decoded fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    /// Engine status code
    pub code: String,
    /// Engine message accompanying a failure code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Candidate routes, best first
    #[serde(default)]
    pub routes: Vec<Route>,
    /// Input coordinates snapped to the network
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
}

impl RouteResponse {
    /// Whether the engine found a route
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == ROUTE_OK
    }
}

/// One route between the requested points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Total distance in meters
    pub distance: f64,
    /// Total duration in seconds
    pub duration: f64,
    /// Engine weight
    #[serde(default)]
    pub weight: f64,
    /// Name of the weight metric
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_name: Option<String>,
    /// Legs between consecutive waypoints
    #[serde(default)]
    pub legs: Vec<RouteLeg>,
    /// Route geometry, passed through untouched
    #[serde(default)]
    pub geometry: serde_json::Value,
}

impl Route {
    /// Replace the aggregate distance and duration with the leg sums
    ///
    /// Legs are authoritative; routes without legs keep the upstream totals.
    #[must_use]
    pub fn with_leg_totals(mut self) -> Self {
        if !self.legs.is_empty() {
            self.distance = self.legs.iter().map(|leg| leg.distance).sum();
            self.duration = self.legs.iter().map(|leg| leg.duration).sum();
        }
        self
    }
}

/// Route section between two waypoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    /// Distance in meters
    pub distance: f64,
    /// Duration in seconds
    pub duration: f64,
    /// Engine weight
    #[serde(default)]
    pub weight: f64,
    /// Human-readable summary (main road names)
    #[serde(default)]
    pub summary: String,
}

/// A requested coordinate snapped to the road network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Name of the snapped street
    #[serde(default)]
    pub name: String,
    /// Snapped position as `[lon, lat]`
    #[serde(default)]
    pub location: Vec<f64>,
    /// Distance in meters from the requested coordinate
    #[serde(default)]
    pub distance: f64,
}
