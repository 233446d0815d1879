//! Caching layer for suggestion lookups.
//!
//! Public Nominatim instances ask clients to keep request volume low.
//! Users often retype or backspace into a query they already searched, so
//! successful lookups are cached per exact query text for a few minutes.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::Coordinates;

use super::error::GeocodeError;
use super::provider::SuggestionProvider;
use super::types::AddressSuggestion;

/// Cached suggestion list.
type SuggestionEntry = Arc<Vec<AddressSuggestion>>;

/// Configuration for the suggestion cache.
#[derive(Debug, Clone)]
pub struct SuggestionCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached queries.
    pub max_capacity: u64,
}

impl Default for SuggestionCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 500,
        }
    }
}

/// Suggestion provider with caching.
///
/// Wraps any [`SuggestionProvider`]. Failed lookups are not cached.
pub struct CachedProvider<P> {
    inner: P,
    cache: MokaCache<String, SuggestionEntry>,
}

impl<P: SuggestionProvider> CachedProvider<P> {
    /// Create a new cached provider.
    pub fn new(inner: P, config: &SuggestionCacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, cache }
    }

    /// Access the wrapped provider.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

impl<P: SuggestionProvider> SuggestionProvider for CachedProvider<P> {
    async fn suggest(&self, query: &str) -> Result<Vec<AddressSuggestion>, GeocodeError> {
        if let Some(entry) = self.cache.get(query).await {
            trace!(query, "suggestion cache hit");
            return Ok(entry.as_ref().clone());
        }

        let suggestions = self.inner.suggest(query).await?;
        self.cache
            .insert(query.to_string(), Arc::new(suggestions.clone()))
            .await;

        Ok(suggestions)
    }

    async fn resolve(&self, suggestion: &AddressSuggestion) -> Result<Coordinates, GeocodeError> {
        self.inner.resolve(suggestion).await
    }
}
