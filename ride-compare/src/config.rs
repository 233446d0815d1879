//! Application configuration.
//!
//! Values come from the process environment, optionally seeded from a
//! `.env` file.

use crate::compare::{ANDROID_EMULATOR_API_URL, CompareConfig, DEFAULT_API_URL};
use crate::geocode::{
    GeocodeError, LocationProvider, NominatimConfig, PlacesConfig, SuggestionCacheConfig,
};
use crate::search::SearchConfig;

/// Errors from loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Where the client runs, which decides the default backend URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Target {
    /// Browser or physical device; the backend is on localhost
    #[default]
    Device,
    /// Android emulator; the host is reachable at 10.0.2.2
    AndroidEmulator,
}

impl Target {
    pub fn default_api_url(&self) -> &'static str {
        match self {
            Target::Device => DEFAULT_API_URL,
            Target::AndroidEmulator => ANDROID_EMULATOR_API_URL,
        }
    }
}

/// Complete client configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub compare: CompareConfig,
    pub nominatim: NominatimConfig,
    /// Present only when a non-empty API key is configured
    pub places: Option<PlacesConfig>,
    pub search: SearchConfig,
    pub cache: SuggestionCacheConfig,
}

impl AppConfig {
    /// Build the location provider this configuration selects.
    pub fn location_provider(&self) -> Result<LocationProvider, GeocodeError> {
        LocationProvider::from_config(self.nominatim.clone(), self.places.clone())
    }
}

/// Load configuration, reading `.env` first if present.
pub fn load_app_config(target: Target) -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env(target)
}

/// Load configuration from the process environment only.
pub fn load_app_config_from_env(target: Target) -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key), target)
}

fn build_app_config<F>(lookup: F, target: Target) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    // Empty values count as unset
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        match optional(var) {
            Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
            None => Ok(default),
        }
    };

    let timeout_secs = parse_u64("REQUEST_TIMEOUT_SECS", 30)?;

    let api_url = optional("API_URL").unwrap_or_else(|| target.default_api_url().to_string());
    let compare = CompareConfig::new(api_url).with_timeout(timeout_secs);

    let mut nominatim = NominatimConfig::new().with_timeout(timeout_secs);
    if let Some(url) = optional("GEOCODER_URL") {
        nominatim = nominatim.with_base_url(url);
    }
    if let Some(user_agent) = optional("GEOCODER_USER_AGENT") {
        nominatim = nominatim.with_user_agent(user_agent);
    }

    let places = optional("GOOGLE_MAPS_API_KEY").map(|key| {
        let config = PlacesConfig::new(key).with_timeout(timeout_secs);
        match optional("PLACES_URL") {
            Some(url) => config.with_base_url(url),
            None => config,
        }
    });

    let defaults = SearchConfig::default();
    let search = SearchConfig::new(
        parse_u64("SEARCH_DEBOUNCE_MS", defaults.debounce_ms)?,
        defaults.min_query_len,
    );

    Ok(AppConfig {
        compare,
        nominatim,
        places,
        search,
        cache: SuggestionCacheConfig::default(),
    })
}
