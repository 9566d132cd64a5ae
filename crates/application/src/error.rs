//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Tool arguments were missing, malformed or out of range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The request was canceled before it completed
    #[error("Request canceled")]
    Canceled,

    /// The upstream could not be reached or did not answer in time
    #[error("{0}")]
    UpstreamUnavailable(String),

    /// The upstream answered with a non-success status
    #[error("{message}")]
    UpstreamStatus {
        /// HTTP status code
        status: u16,
        /// Description naming the upstream, the status and its diagnostics
        message: String,
    },

    /// The upstream response could not be decoded
    #[error("{0}")]
    Decode(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use domain::GeoLocation;

    use super::*;

    #[test]
    fn test_domain_error_is_invalid_argument() {
        let err = GeoLocation::new(91.0, 0.0).unwrap_err();
        let err: ApplicationError = DomainError::from(err).into();
        assert!(matches!(err, ApplicationError::InvalidArgument(_)));
        assert!(err.to_string().starts_with("Invalid argument"));
    }
}
