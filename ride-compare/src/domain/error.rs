//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from API/IO errors.

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Latitude outside [-90, 90] or not a finite number
    #[error("invalid latitude: {0}")]
    InvalidLatitude(f64),

    /// Longitude outside [-180, 180] or not a finite number
    #[error("invalid longitude: {0}")]
    InvalidLongitude(f64),

    /// Coordinate text that does not parse as a decimal number
    #[error("unparseable coordinate: {0:?}")]
    UnparseableCoordinate(String),

    /// Category name outside the closed set
    #[error("unknown ride category: {0:?}")]
    UnknownCategory(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::InvalidLatitude(91.0);
        assert_eq!(err.to_string(), "invalid latitude: 91");

        let err = DomainError::InvalidLongitude(-181.5);
        assert_eq!(err.to_string(), "invalid longitude: -181.5");

        let err = DomainError::UnparseableCoordinate("abc".into());
        assert_eq!(err.to_string(), "unparseable coordinate: \"abc\"");

        let err = DomainError::UnknownCategory("Moto".into());
        assert_eq!(err.to_string(), "unknown ride category: \"Moto\"");
    }
}
