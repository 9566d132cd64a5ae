//! Gateway error types

use std::fmt;

use thiserror::Error;

/// Maximum number of body characters kept in a status error
const MAX_BODY_CHARS: usize = 1024;

/// The upstream service a request was sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Upstream {
    /// Nominatim search and reverse geocoding
    Geocoding,
    /// Overpass interpreter
    FeatureQuery,
    /// OSRM route service
    Routing,
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Geocoding => "geocoding service",
            Self::FeatureQuery => "feature query service",
            Self::Routing => "routing service",
        })
    }
}

/// Errors that can occur while talking to an upstream
#[derive(Debug, Error)]
pub enum OsmError {
    /// The caller canceled while waiting for the rate gate or the response
    #[error("Request canceled")]
    Canceled,

    /// Transport-level failure: DNS, connection refused, timeout
    #[error("{upstream} unavailable: {message}")]
    UpstreamUnavailable {
        /// Service that failed
        upstream: Upstream,
        /// Transport error description
        message: String,
    },

    /// The upstream answered with a status other than 200
    #[error("{upstream} returned HTTP {status}{}", body_suffix(.body))]
    UpstreamStatus {
        /// Service that answered
        upstream: Upstream,
        /// HTTP status code
        status: u16,
        /// Trimmed response body (upstreams put diagnostics here)
        body: String,
    },

    /// The response body did not have the expected shape
    #[error("Failed to decode {upstream} response: {message}")]
    Decode {
        /// Service that answered
        upstream: Upstream,
        /// Decoder error description
        message: String,
    },

    /// Client configuration is invalid
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl OsmError {
    /// Build a status error, trimming and capping the body
    pub(crate) fn status(upstream: Upstream, status: u16, body: &str) -> Self {
        Self::UpstreamStatus {
            upstream,
            status,
            body: body.trim().chars().take(MAX_BODY_CHARS).collect(),
        }
    }

    /// Build a decode error
    pub(crate) fn decode(upstream: Upstream, message: impl Into<String>) -> Self {
        Self::Decode {
            upstream,
            message: message.into(),
        }
    }
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(", body: {body}")
    }
}
