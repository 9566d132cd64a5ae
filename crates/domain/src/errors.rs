//! Domain-level errors

use thiserror::Error;

use crate::value_objects::InvalidCoordinates;

/// Errors raised while building domain values from untrusted input
#[derive(Debug, Error)]
pub enum DomainError {
    /// Coordinates out of range
    #[error("{0}")]
    InvalidCoordinates(#[from] InvalidCoordinates),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_coordinates_message() {
        let err = DomainError::from(InvalidCoordinates);
        assert!(err.to_string().contains("latitude must be -90 to 90"));
    }
}
