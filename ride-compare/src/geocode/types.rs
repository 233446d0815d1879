//! Suggestion types shared by the geocoding providers.

/// One candidate address for the text typed so far.
///
/// Transient: replaced wholesale whenever a newer lookup lands and dropped
/// once a selection is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressSuggestion {
    /// Human-readable address shown in the dropdown
    pub display_name: String,

    /// Latitude as a decimal string (empty when the provider defers it)
    pub lat: String,

    /// Longitude as a decimal string (empty when the provider defers it)
    pub lon: String,

    /// Provider place ID, for providers that resolve coordinates lazily
    pub place_id: Option<String>,
}

impl AddressSuggestion {
    /// Suggestion with inline coordinates.
    pub fn new(
        display_name: impl Into<String>,
        lat: impl Into<String>,
        lon: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            lat: lat.into(),
            lon: lon.into(),
            place_id: None,
        }
    }

    /// Suggestion whose coordinates come from a later details lookup.
    pub fn deferred(display_name: impl Into<String>, place_id: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            lat: String::new(),
            lon: String::new(),
            place_id: Some(place_id.into()),
        }
    }

    /// Whether coordinates are carried inline.
    pub fn has_inline_coordinates(&self) -> bool {
        !self.lat.is_empty() && !self.lon.is_empty()
    }
}
