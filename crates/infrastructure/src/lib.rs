//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains the OpenStreetMap gateway adapter, configuration loading and
//! logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, LoggingConfig};
pub use telemetry::{TelemetryError, init_logging};
