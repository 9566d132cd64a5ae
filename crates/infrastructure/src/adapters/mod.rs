//! Adapters implementing application ports

mod osm_adapter;

pub use osm_adapter::OsmGatewayAdapter;
