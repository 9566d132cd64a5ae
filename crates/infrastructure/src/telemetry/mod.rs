//! Logging infrastructure
//!
//! Installs the global `tracing` subscriber. Output always goes to stderr so
//! that stdout stays free for tool results.

mod logging;

pub use logging::{TelemetryError, build_filter, init_logging};
