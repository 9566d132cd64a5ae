//! Shared gateway client
//!
//! Owns the HTTP client and the rate gate. The per-upstream request builders
//! and decoders live in `nominatim`, `overpass` and `osrm` as further
//! `impl OsmClient` blocks.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::OsmConfig;
use crate::error::{OsmError, Upstream};
use crate::rate_limiter::RateLimiter;

/// Rate-limited client for the Nominatim, Overpass and OSRM services
///
/// Construct once and share (e.g. behind an `Arc`) across concurrent callers;
/// every method passes through the same [`RateLimiter`].
#[derive(Debug)]
pub struct OsmClient {
    http: Client,
    limiter: RateLimiter,
    config: OsmConfig,
}

impl OsmClient {
    /// Create a new gateway client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &OsmConfig) -> Result<Self, OsmError> {
        config.validate().map_err(OsmError::Configuration)?;

        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| OsmError::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            limiter: RateLimiter::new(config.rate_limit()),
            config: config.clone(),
        })
    }

    /// Replace the rate gate with one using a different spacing
    #[must_use]
    pub fn with_rate_limit(mut self, min_interval: Duration) -> Self {
        self.limiter = RateLimiter::new(min_interval);
        self
    }

    pub(crate) const fn config(&self) -> &OsmConfig {
        &self.config
    }

    #[cfg(test)]
    const fn rate_limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    pub(crate) const fn http(&self) -> &Client {
        &self.http
    }

    /// Pass the rate gate, send the request and return the body of a 200 response
    pub(crate) async fn execute(
        &self,
        upstream: Upstream,
        request: RequestBuilder,
        cancel: &CancellationToken,
    ) -> Result<String, OsmError> {
        self.limiter.acquire(cancel).await?;

        let response = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(OsmError::Canceled),
            response = request.send() => response.map_err(|e| self.transport_error(upstream, &e))?,
        };

        let status = response.status();
        let body = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(OsmError::Canceled),
            body = response.text() => body.map_err(|e| self.transport_error(upstream, &e))?,
        };

        if status != StatusCode::OK {
            debug!(%upstream, %status, "Unexpected upstream status");
            return Err(OsmError::status(upstream, status.as_u16(), &body));
        }

        Ok(body)
    }

    fn transport_error(&self, upstream: Upstream, error: &reqwest::Error) -> OsmError {
        let message = if error.is_timeout() {
            format!(
                "request timed out after {} seconds",
                self.config.timeout_secs
            )
        } else {
            error.to_string()
        };
        OsmError::UpstreamUnavailable { upstream, message }
    }
}

/// Decode a JSON body into `T`
pub(crate) fn decode_json<T: DeserializeOwned>(
    upstream: Upstream,
    body: &str,
) -> Result<T, OsmError> {
    serde_json::from_str(body).map_err(|e| OsmError::decode(upstream, e.to_string()))
}

/// Trim a trailing slash so paths can be appended
pub(crate) fn join_path(base: &str, path: &str) -> String {
    format!("{}{path}", base.trim_end_matches('/'))
}
