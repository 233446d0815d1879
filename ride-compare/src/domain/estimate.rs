//! Provider price/ETA estimates.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::NormalizedCategory;

/// One provider's quote for one category.
///
/// Deserialized as-is from the comparison backend. Only the type shape is
/// checked: a missing or unrecognised category is carried through
/// untouched and grouped as `Standard`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    /// Ride-hailing company, e.g. "Uber"
    pub provider: String,

    /// Category as the backend reported it
    #[serde(default)]
    pub normalized_category: NormalizedCategory,

    /// Quoted price in the backend's currency
    pub estimated_price: f64,

    /// Minutes until pickup
    pub eta_minutes: u32,

    /// Deep link into the provider's app (may be empty)
    #[serde(default)]
    pub redirect_url: String,
}

impl Estimate {
    /// Identity of this estimate within one comparison response.
    pub fn key(&self) -> EstimateKey {
        EstimateKey {
            provider: self.provider.clone(),
            category: self.normalized_category.as_str().to_string(),
        }
    }

    pub fn has_redirect(&self) -> bool {
        !self.redirect_url.is_empty()
    }
}

/// `(provider, category)` pair identifying an estimate.
///
/// Displays as `provider-category`, e.g. `Lyft-Standard`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EstimateKey {
    pub provider: String,
    pub category: String,
}

impl fmt::Display for EstimateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.provider, self.category)
    }
}
