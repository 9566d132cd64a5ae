//! Application configuration
//!
//! Layered in this order, later sources winning:
//!
//! 1. built-in defaults (see [`OsmConfig`] and [`LoggingConfig`]),
//! 2. an optional `geo-gateway.toml` in the working directory, or the file
//!    passed explicitly,
//! 3. environment variables prefixed with `GEO_GATEWAY_`, using `__` to
//!    separate nested keys (e.g. `GEO_GATEWAY_OSM__RATE_LIMIT_SECS=1`).

mod logging;

use std::path::Path;

use integration_osm::OsmConfig;
use serde::{Deserialize, Serialize};

pub use logging::LoggingConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "GEO_GATEWAY";

/// Default configuration file name (without extension)
pub const DEFAULT_CONFIG_FILE: &str = "geo-gateway";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Upstream endpoints, identification and rate limiting
    #[serde(default)]
    pub osm: OsmConfig,

    /// Log output configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly given file is missing, a source
    /// cannot be parsed, or the merged values do not validate.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with(path, environment())
    }

    /// Load configuration using a custom environment source
    ///
    /// # Errors
    ///
    /// See [`AppConfig::load`].
    pub fn load_with(
        path: Option<&Path>,
        env: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("logging.filter", logging::DEFAULT_FILTER)?
            // Load from file if exists
            .add_source(file)
            // Override with environment variables (e.g., GEO_GATEWAY_OSM__TIMEOUT_SECS)
            .add_source(env);

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check the merged values
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Message` describing the first invalid value.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        self.osm.validate().map_err(config::ConfigError::Message)
    }
}

/// Environment source with the gateway prefix and nesting separator
#[must_use]
pub fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        environment().source(Some(map))
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::load_with(None, env(&[])).unwrap();
        assert_eq!(config.osm.rate_limit_secs, 5);
        assert_eq!(config.osm.timeout_secs, 30);
        assert_eq!(
            config.osm.nominatim_base_url,
            "https://nominatim.openstreetmap.org"
        );
        assert_eq!(config.logging.filter, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_environment_overrides() {
        let config = AppConfig::load_with(
            None,
            env(&[
                ("GEO_GATEWAY_OSM__RATE_LIMIT_SECS", "1"),
                ("GEO_GATEWAY_OSM__OSRM_BASE_URL", "http://localhost:5000"),
                ("GEO_GATEWAY_LOGGING__JSON", "true"),
            ]),
        )
        .unwrap();
        assert_eq!(config.osm.rate_limit_secs, 1);
        assert_eq!(config.osm.osrm_base_url, "http://localhost:5000");
        assert!(config.logging.json);
    }

    #[test]
    fn test_file_then_environment() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[osm]\nuser_agent = \"geo-test/1.0\"\nrate_limit_secs = 2\n\n[logging]\nfilter = \"debug\""
        )
        .unwrap();

        let config = AppConfig::load_with(
            Some(file.path()),
            env(&[("GEO_GATEWAY_OSM__RATE_LIMIT_SECS", "0")]),
        )
        .unwrap();
        assert_eq!(config.osm.user_agent, "geo-test/1.0");
        assert_eq!(config.osm.rate_limit_secs, 0);
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let missing = Path::new("/nonexistent/geo-gateway.toml");
        let result = AppConfig::load_with(Some(missing), env(&[]));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let result = AppConfig::load_with(None, env(&[("GEO_GATEWAY_OSM__TIMEOUT_SECS", "0")]));
        assert!(matches!(result, Err(config::ConfigError::Message(_))));
    }
}
