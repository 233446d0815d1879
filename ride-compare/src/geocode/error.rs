//! Geocoding error types.

use crate::domain::DomainError;

/// Errors from the geocoding and places clients.
///
/// Location search swallows these (an empty suggestion list is shown); they
/// only surface when resolving a selected suggestion.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Places API answered with a non-OK status field
    #[error("places API status {status}")]
    Places { status: String },

    /// Place details had no geometry
    #[error("no location found for place {0}")]
    NoLocation(String),

    /// Suggestion coordinates failed validation
    #[error("invalid suggestion coordinates: {0}")]
    InvalidCoordinates(#[from] DomainError),

    /// Client could not be configured
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// The input changed while a selection was being resolved
    #[error("selection superseded by newer input")]
    Superseded,
}
