//! OpenStreetMap gateway
//!
//! A single client fronting three upstream services:
//!
//! - [Nominatim](https://nominatim.openstreetmap.org) for geocoding and reverse geocoding
//! - [Overpass](https://overpass-api.de) for feature/POI filter queries
//! - [OSRM](https://router.project-osrm.org) for routing
//!
//! # Architecture
//!
//! [`OsmClient`] owns one [`RateLimiter`] that spaces out *all* outbound
//! requests, whichever upstream they target. Each upstream lives in its own
//! module and only knows its own wire format. [`FeatureQuery`] renders the
//! filter query language sent to Overpass.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_osm::{OsmClient, OsmConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! let client = OsmClient::new(&OsmConfig::default())?;
//! let places = client.geocode("Brandenburger Tor", &CancellationToken::new()).await?;
//! ```

mod client;
mod config;
mod error;
mod nominatim;
mod osrm;
mod overpass;
mod query;
mod rate_limiter;

pub use client::OsmClient;
pub use config::OsmConfig;
pub use error::{OsmError, Upstream};
pub use query::{FeatureQuery, SearchArea, TagFilter};
pub use rate_limiter::RateLimiter;
