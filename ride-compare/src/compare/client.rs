//! Comparison backend HTTP client.
//!
//! Two endpoints: `POST /compare` takes a [`TripRequest`] and returns the
//! providers' estimates, `GET /health` is a liveness probe.

use crate::domain::{Estimate, TripRequest};

use super::error::CompareError;

/// Backend URL for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Backend URL as seen from the Android emulator, where the host machine
/// is reachable at 10.0.2.2 rather than localhost.
pub const ANDROID_EMULATOR_API_URL: &str = "http://10.0.2.2:8000";

/// Configuration for the comparison client.
#[derive(Debug, Clone)]
pub struct CompareConfig {
    /// Backend base URL
    pub api_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl CompareConfig {
    /// Create a new config for the given backend.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            timeout_secs: 30,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

/// Client for the comparison backend.
#[derive(Debug, Clone)]
pub struct CompareClient {
    http: reqwest::Client,
    base_url: String,
}

impl CompareClient {
    /// Create a new comparison client.
    pub fn new(config: CompareConfig) -> Result<Self, CompareError> {
        if config.api_url.trim().is_empty() {
            return Err(CompareError::NotConfigured("API_URL is empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request estimates for a trip.
    ///
    /// Non-success statuses become [`CompareError::Status`] carrying the
    /// raw response body.
    pub async fn compare(&self, request: &TripRequest) -> Result<Vec<Estimate>, CompareError> {
        let url = format!("{}/compare", self.base_url);

        let response = self.http.post(&url).json(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompareError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| CompareError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }

    /// Whether the backend is up. Any transport error or non-success
    /// status counts as down; the body is not read.
    pub async fn health(&self) -> bool {
        let url = format!("{}/health", self.base_url);

        match self.http.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
