//! Suggestion provider abstraction.

use std::future::Future;

use tracing::info;

use crate::domain::Coordinates;

use super::error::GeocodeError;
use super::nominatim::{NominatimClient, NominatimConfig};
use super::places::{PlacesClient, PlacesConfig};
use super::types::AddressSuggestion;

/// Trait for turning text into suggestions and suggestions into locations.
///
/// This abstraction allows location search to be tested with canned data.
pub trait SuggestionProvider: Send + Sync {
    /// Get address suggestions for a query.
    fn suggest(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<AddressSuggestion>, GeocodeError>> + Send;

    /// Resolve a chosen suggestion into coordinates.
    fn resolve(
        &self,
        suggestion: &AddressSuggestion,
    ) -> impl Future<Output = Result<Coordinates, GeocodeError>> + Send;
}

/// Resolve a suggestion that carries its coordinates inline.
pub fn resolve_inline(suggestion: &AddressSuggestion) -> Result<Coordinates, GeocodeError> {
    Ok(Coordinates::parse(
        &suggestion.lat,
        &suggestion.lon,
        suggestion.display_name.clone(),
    )?)
}

impl SuggestionProvider for NominatimClient {
    async fn suggest(&self, query: &str) -> Result<Vec<AddressSuggestion>, GeocodeError> {
        self.search(query).await
    }

    async fn resolve(&self, suggestion: &AddressSuggestion) -> Result<Coordinates, GeocodeError> {
        resolve_inline(suggestion)
    }
}

impl SuggestionProvider for PlacesClient {
    async fn suggest(&self, query: &str) -> Result<Vec<AddressSuggestion>, GeocodeError> {
        self.autocomplete(query).await
    }

    async fn resolve(&self, suggestion: &AddressSuggestion) -> Result<Coordinates, GeocodeError> {
        if suggestion.has_inline_coordinates() {
            return resolve_inline(suggestion);
        }
        match &suggestion.place_id {
            Some(place_id) => self.details(place_id).await,
            None => Err(GeocodeError::NoLocation(suggestion.display_name.clone())),
        }
    }
}

/// The provider strategy chosen for a location search.
///
/// Selected once at construction from configuration; never switched per
/// call.
#[derive(Debug)]
pub enum LocationProvider {
    Nominatim(NominatimClient),
    Places(PlacesClient),
}

impl LocationProvider {
    /// Pick the places provider when an API key is present, otherwise
    /// fall back to Nominatim.
    pub fn from_config(
        nominatim: NominatimConfig,
        places: Option<PlacesConfig>,
    ) -> Result<Self, GeocodeError> {
        match places.filter(|p| !p.api_key.trim().is_empty()) {
            Some(config) => {
                info!("using places autocomplete for location search");
                Ok(LocationProvider::Places(PlacesClient::new(config)))
            }
            None => {
                info!(base_url = %nominatim.base_url, "using nominatim for location search");
                Ok(LocationProvider::Nominatim(NominatimClient::new(nominatim)?))
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LocationProvider::Nominatim(_) => "nominatim",
            LocationProvider::Places(_) => "places",
        }
    }
}

impl SuggestionProvider for LocationProvider {
    async fn suggest(&self, query: &str) -> Result<Vec<AddressSuggestion>, GeocodeError> {
        match self {
            LocationProvider::Nominatim(client) => client.suggest(query).await,
            LocationProvider::Places(client) => client.suggest(query).await,
        }
    }

    async fn resolve(&self, suggestion: &AddressSuggestion) -> Result<Coordinates, GeocodeError> {
        match self {
            LocationProvider::Nominatim(client) => client.resolve(suggestion).await,
            LocationProvider::Places(client) => client.resolve(suggestion).await,
        }
    }
}
