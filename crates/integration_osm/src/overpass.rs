//! Overpass feature queries
//!
//! The interpreter takes the query text as a form-encoded `data` field and
//! answers with `{"elements": [...]}`. On syntax errors it responds with a
//! non-200 status and puts the details in the body.

use domain::FeatureElement;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use crate::client::{OsmClient, decode_json};
use crate::error::{OsmError, Upstream};
use crate::query::FeatureQuery;

const UPSTREAM: Upstream = Upstream::FeatureQuery;

impl OsmClient {
    /// Run raw filter-query text against the interpreter
    ///
    /// # Errors
    ///
    /// Returns an error if the request is canceled, the service is
    /// unreachable, rejects the query (the error carries its diagnostics),
    /// or sends a malformed body.
    #[instrument(skip(self, query, cancel), fields(query_len = query.len()))]
    pub async fn feature_query(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<FeatureElement>, OsmError> {
        let request = self
            .http()
            .post(&self.config().overpass_url)
            .form(&[("data", query)]);

        debug!(%query, "Running feature query");
        let body = self.execute(UPSTREAM, request, cancel).await?;
        let elements = parse_interpreter_response(&body)?;
        debug!(count = elements.len(), "Feature query results");
        Ok(elements)
    }

    /// Render a [`FeatureQuery`] and run it
    ///
    /// # Errors
    ///
    /// See [`OsmClient::feature_query`].
    pub async fn run_query(
        &self,
        query: &FeatureQuery,
        cancel: &CancellationToken,
    ) -> Result<Vec<FeatureElement>, OsmError> {
        self.feature_query(&query.render(), cancel).await
    }
}

/// Parse an interpreter response body
pub(crate) fn parse_interpreter_response(body: &str) -> Result<Vec<FeatureElement>, OsmError> {
    let raw: RawInterpreterResponse = decode_json(UPSTREAM, body)?;
    if let Some(remark) = raw.remark.as_deref() {
        // runtime errors (timeouts, memory) arrive as a 200 with a remark
        warn!(%remark, "Feature query finished with a remark");
    }
    Ok(raw.elements)
}

#[derive(Debug, Deserialize)]
struct RawInterpreterResponse {
    elements: Vec<FeatureElement>,
    remark: Option<String>,
}
