//! Resolved trip endpoints.

use std::fmt;

use super::DomainError;

/// A resolved location: a position plus the address it was chosen as.
///
/// Created only by resolving a search suggestion and immutable afterwards.
/// Latitude is guaranteed to lie in [-90, 90] and longitude in
/// [-180, 180].
///
/// # Examples
///
/// ```
/// use ride_compare::domain::Coordinates;
///
/// let seattle = Coordinates::parse("47.6062", "-122.3321", "Seattle, WA, USA").unwrap();
/// assert_eq!(seattle.latitude(), 47.6062);
/// assert_eq!(seattle.label(), "Seattle, WA, USA");
///
/// assert!(Coordinates::new(91.0, 0.0, "nowhere").is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
    label: String,
}

impl Coordinates {
    /// Create coordinates, validating the ranges.
    pub fn new(
        latitude: f64,
        longitude: f64,
        label: impl Into<String>,
    ) -> Result<Self, DomainError> {
        validate(latitude, longitude)?;

        Ok(Self {
            latitude,
            longitude,
            label: label.into(),
        })
    }

    /// Create coordinates from the decimal strings geocoders return.
    pub fn parse(lat: &str, lon: &str, label: impl Into<String>) -> Result<Self, DomainError> {
        let latitude = parse_decimal(lat)?;
        let longitude = parse_decimal(lon)?;
        Self::new(latitude, longitude, label)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// The address text this location was selected as.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.4}, {:.4})", self.label, self.latitude, self.longitude)
    }
}

/// Check that a position lies within [-90, 90] by [-180, 180].
pub(crate) fn validate(latitude: f64, longitude: f64) -> Result<(), DomainError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(DomainError::InvalidLatitude(latitude));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(DomainError::InvalidLongitude(longitude));
    }
    Ok(())
}

fn parse_decimal(s: &str) -> Result<f64, DomainError> {
    s.trim()
        .parse()
        .map_err(|_| DomainError::UnparseableCoordinate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_nominatim_strings() {
        let coords = Coordinates::parse("47.6062", "-122.3321", "Seattle, WA, USA").unwrap();
        assert_eq!(coords.latitude(), 47.6062);
        assert_eq!(coords.longitude(), -122.3321);
        assert_eq!(coords.label(), "Seattle, WA, USA");
    }

    #[test]
    fn boundaries_are_inclusive() {
        assert!(Coordinates::new(90.0, 180.0, "corner").is_ok());
        assert!(Coordinates::new(-90.0, -180.0, "corner").is_ok());
    }

    #[test]
    fn out_of_range_rejected() {
        assert_eq!(
            Coordinates::new(90.5, 0.0, "x"),
            Err(DomainError::InvalidLatitude(90.5))
        );
        assert_eq!(
            Coordinates::new(0.0, 180.5, "x"),
            Err(DomainError::InvalidLongitude(180.5))
        );
    }

    #[test]
    fn non_finite_rejected() {
        assert!(Coordinates::new(f64::NAN, 0.0, "x").is_err());
        assert!(Coordinates::new(0.0, f64::INFINITY, "x").is_err());
    }

    #[test]
    fn garbage_rejected() {
        assert_eq!(
            Coordinates::parse("north", "0", "x"),
            Err(DomainError::UnparseableCoordinate("north".into()))
        );
        assert!(Coordinates::parse("", "0", "x").is_err());
    }

    #[test]
    fn display_includes_label() {
        let coords = Coordinates::new(51.5, -0.12, "London").unwrap();
        assert_eq!(coords.to_string(), "London (51.5000, -0.1200)");
    }
}
