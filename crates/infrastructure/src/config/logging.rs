//! Log output configuration

use serde::{Deserialize, Serialize};

pub(super) const DEFAULT_FILTER: &str = "info";

/// Log output settings
///
/// `RUST_LOG` takes precedence over `filter` when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive (e.g. `info`, `integration_osm=debug`)
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Emit one JSON object per event instead of human-readable lines
    #[serde(default)]
    pub json: bool,
}

fn default_filter() -> String {
    DEFAULT_FILTER.to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}
