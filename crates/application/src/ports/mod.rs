//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod geo_gateway_port;

pub use geo_gateway_port::GeoGatewayPort;
#[cfg(test)]
pub use geo_gateway_port::MockGeoGatewayPort;
