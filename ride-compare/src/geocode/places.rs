//! Google Places autocomplete client.
//!
//! The HTTP client is only built on first use, so configuring a key costs
//! nothing until the user actually types into a location field.

use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::domain::Coordinates;

use super::error::GeocodeError;
use super::types::AddressSuggestion;

/// Default base URL for the Places web service.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    status: String,
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    description: String,
    place_id: String,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    result: Option<PlaceResult>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    formatted_address: Option<String>,
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

/// Configuration for the Places client.
#[derive(Debug, Clone)]
pub struct PlacesConfig {
    /// API key (the provider is disabled without one)
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl PlacesConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Places autocomplete and details client.
#[derive(Debug)]
pub struct PlacesClient {
    config: PlacesConfig,
    http: OnceCell<reqwest::Client>,
}

impl PlacesClient {
    /// Create a client. No connection pool is built yet.
    pub fn new(config: PlacesConfig) -> Self {
        Self {
            config: PlacesConfig {
                base_url: config.base_url.trim_end_matches('/').to_string(),
                ..config
            },
            http: OnceCell::new(),
        }
    }

    /// Whether the HTTP client has been built.
    pub fn is_loaded(&self) -> bool {
        self.http.initialized()
    }

    async fn http(&self) -> Result<&reqwest::Client, GeocodeError> {
        self.http
            .get_or_try_init(|| async {
                debug!("loading places client");
                reqwest::Client::builder()
                    .timeout(std::time::Duration::from_secs(self.config.timeout_secs))
                    .build()
                    .map_err(GeocodeError::from)
            })
            .await
    }

    /// Get autocomplete predictions for partial input.
    pub async fn autocomplete(&self, input: &str) -> Result<Vec<AddressSuggestion>, GeocodeError> {
        let url = format!("{}/place/autocomplete/json", self.config.base_url);

        let body = self
            .get_json(&url, &[("input", input), ("key", self.config.api_key.as_str())])
            .await?;

        let response: AutocompleteResponse =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
                message: e.to_string(),
            })?;

        match response.status.as_str() {
            "OK" | "ZERO_RESULTS" => Ok(response
                .predictions
                .into_iter()
                .map(|p| AddressSuggestion::deferred(p.description, p.place_id))
                .collect()),
            _ => Err(GeocodeError::Places {
                status: response.status,
            }),
        }
    }

    /// Resolve a place ID into coordinates and its formatted address.
    pub async fn details(&self, place_id: &str) -> Result<Coordinates, GeocodeError> {
        let url = format!("{}/place/details/json", self.config.base_url);

        let body = self
            .get_json(
                &url,
                &[
                    ("place_id", place_id),
                    ("fields", "geometry,formatted_address"),
                    ("key", self.config.api_key.as_str()),
                ],
            )
            .await?;

        let response: DetailsResponse =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
                message: e.to_string(),
            })?;

        if response.status != "OK" {
            return Err(GeocodeError::Places {
                status: response.status,
            });
        }

        let result = response
            .result
            .ok_or_else(|| GeocodeError::NoLocation(place_id.to_string()))?;
        let location = result
            .geometry
            .ok_or_else(|| GeocodeError::NoLocation(place_id.to_string()))?
            .location;

        Ok(Coordinates::new(
            location.lat,
            location.lng,
            result.formatted_address.unwrap_or_default(),
        )?)
    }

    async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<String, GeocodeError> {
        let response = self.http().await?.get(url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }
}
