//! Nominatim free-text search client.

use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use serde::Deserialize;

use super::error::GeocodeError;
use super::types::AddressSuggestion;

/// Default base URL for the public OpenStreetMap Nominatim instance.
const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Default number of suggestions requested per lookup.
const DEFAULT_LIMIT: u8 = 5;

/// User agent sent when none is configured.
const DEFAULT_USER_AGENT: &str = concat!("ride-compare/", env!("CARGO_PKG_VERSION"));

/// One entry of a Nominatim search response. Only the fields we use.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    display_name: String,
    lat: String,
    lon: String,
}

/// Configuration for the Nominatim client.
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Base URL of a Nominatim-compatible service
    pub base_url: String,
    /// Maximum suggestions per lookup
    pub limit: u8,
    /// Value of the `Accept-Language` header
    pub accept_language: String,
    /// Custom user agent (the mobile client identifies itself)
    pub user_agent: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl NominatimConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            limit: DEFAULT_LIMIT,
            accept_language: "en".to_string(),
            user_agent: None,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing or self-hosted instances).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the maximum number of suggestions.
    pub fn with_limit(mut self, limit: u8) -> Self {
        self.limit = limit;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for Nominatim's `/search` endpoint.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    base_url: String,
    limit: u8,
}

impl NominatimClient {
    /// Create a new Nominatim client.
    pub fn new(config: NominatimConfig) -> Result<Self, GeocodeError> {
        let mut headers = HeaderMap::new();

        let language = HeaderValue::from_str(&config.accept_language)
            .map_err(|_| GeocodeError::NotConfigured("invalid Accept-Language value".to_string()))?;
        headers.insert(ACCEPT_LANGUAGE, language);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT))
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            limit: config.limit,
        })
    }

    /// Look up addresses matching free text.
    pub async fn search(&self, query: &str) -> Result<Vec<AddressSuggestion>, GeocodeError> {
        let url = format!("{}/search", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("format", "json".to_string()),
                ("q", query.to_string()),
                ("limit", self.limit.to_string()),
                ("addressdetails", "1".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let places: Vec<NominatimPlace> =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
                message: e.to_string(),
            })?;

        Ok(places
            .into_iter()
            .map(|p| AddressSuggestion::new(p.display_name, p.lat, p.lon))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = NominatimConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.limit, 5);
        assert_eq!(config.accept_language, "en");
        assert!(config.user_agent.is_none());
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_builder() {
        let config = NominatimConfig::new()
            .with_base_url("http://localhost:8080")
            .with_user_agent("RideCompare/1.0")
            .with_limit(3)
            .with_timeout(5);

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.user_agent.as_deref(), Some("RideCompare/1.0"));
        assert_eq!(config.limit, 3);
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn client_creation() {
        assert!(NominatimClient::new(NominatimConfig::new()).is_ok());
    }

    #[test]
    fn parse_response_ignores_extra_fields() {
        let body = r#"[{
            "place_id": 297632813,
            "display_name": "Seattle, King County, Washington, United States",
            "lat": "47.6038321",
            "lon": "-122.330062",
            "address": {"city": "Seattle"}
        }]"#;

        let places: Vec<NominatimPlace> = serde_json::from_str(body).unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].lat, "47.6038321");
    }
}
