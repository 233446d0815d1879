//! Geocoding providers for location search.
//!
//! Two interchangeable strategies turn free text into address suggestions:
//! - [`NominatimClient`]: OpenStreetMap's free-text search. Suggestions
//!   carry their coordinates inline.
//! - [`PlacesClient`]: Google Places autocomplete, only available when an
//!   API key is configured. Suggestions carry a place ID that is resolved
//!   to coordinates through a details lookup on selection.
//!
//! [`LocationProvider`] picks one of them at construction time.

mod cache;
mod error;
mod nominatim;
mod places;
mod provider;
mod types;

pub use cache::{CachedProvider, SuggestionCacheConfig};
pub use error::GeocodeError;
pub use nominatim::{NominatimClient, NominatimConfig};
pub use places::{PlacesClient, PlacesConfig};
pub use provider::{LocationProvider, SuggestionProvider, resolve_inline};
pub use types::AddressSuggestion;
