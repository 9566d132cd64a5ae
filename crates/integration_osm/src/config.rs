//! Gateway configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for the OpenStreetMap gateway client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OsmConfig {
    /// User-Agent sent with every request (required by the OSM usage policies)
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Base URL for the Nominatim API
    #[serde(default = "default_nominatim_base_url")]
    pub nominatim_base_url: String,

    /// Full URL of the Overpass interpreter endpoint
    #[serde(default = "default_overpass_url")]
    pub overpass_url: String,

    /// Base URL for the OSRM API
    #[serde(default = "default_osrm_base_url")]
    pub osrm_base_url: String,

    /// Minimum seconds between two outbound requests (0 disables the gate)
    #[serde(default = "default_rate_limit_secs")]
    pub rate_limit_secs: u64,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_user_agent() -> String {
    concat!("geo-gateway/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_nominatim_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_overpass_url() -> String {
    "https://overpass-api.de/api/interpreter".to_string()
}

fn default_osrm_base_url() -> String {
    "https://router.project-osrm.org".to_string()
}

const fn default_rate_limit_secs() -> u64 {
    5
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for OsmConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            nominatim_base_url: default_nominatim_base_url(),
            overpass_url: default_overpass_url(),
            osrm_base_url: default_osrm_base_url(),
            rate_limit_secs: default_rate_limit_secs(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl OsmConfig {
    /// Create a configuration suitable for testing, with every upstream
    /// pointed at `base_url` and the rate gate disabled
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            user_agent: "geo-gateway-tests".to_string(),
            nominatim_base_url: base_url.to_string(),
            overpass_url: format!("{base_url}/api/interpreter"),
            osrm_base_url: base_url.to_string(),
            rate_limit_secs: 0,
            timeout_secs: 5,
        }
    }

    /// Minimum spacing between requests
    #[must_use]
    pub const fn rate_limit(&self) -> Duration {
        Duration::from_secs(self.rate_limit_secs)
    }

    /// Request timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }

        for (name, value) in [
            ("nominatim_base_url", &self.nominatim_base_url),
            ("overpass_url", &self.overpass_url),
            ("osrm_base_url", &self.osrm_base_url),
        ] {
            Url::parse(value).map_err(|e| format!("{name} is not a valid URL: {e}"))?;
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}
