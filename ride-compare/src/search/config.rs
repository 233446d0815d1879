//! Search configuration for location lookups.

use std::time::Duration;

/// Configuration parameters for location search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// How long input must stay unchanged before a lookup (milliseconds).
    pub debounce_ms: u64,

    /// Minimum number of characters before a lookup is issued.
    /// Shorter input clears the suggestions.
    pub min_query_len: usize,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(debounce_ms: u64, min_query_len: usize) -> Self {
        Self {
            debounce_ms,
            min_query_len,
        }
    }

    /// Returns the debounce interval as a Duration.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Whether `text` is long enough to look up.
    pub fn is_searchable(&self, text: &str) -> bool {
        text.chars().count() >= self.min_query_len
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            min_query_len: 3,
        }
    }
}
