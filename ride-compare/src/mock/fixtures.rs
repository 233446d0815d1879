//! Canned estimates loaded from a JSON file.

use std::path::Path;

use crate::domain::{Estimate, NormalizedCategory, TripRequest};

use super::error::MockError;
use super::redirect::redirect_url;

/// Estimates the mock backend answers with.
///
/// The fixture file is a JSON array in the `/compare` response shape;
/// `redirect_url` may be omitted and is filled in per request.
#[derive(Debug, Clone)]
pub struct EstimateFixtures {
    estimates: Vec<Estimate>,
}

impl EstimateFixtures {
    /// Load fixtures from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MockError> {
        let path = path.as_ref();

        let json = std::fs::read_to_string(path).map_err(|source| MockError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let estimates: Vec<Estimate> =
            serde_json::from_str(&json).map_err(|e| MockError::Json {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        if estimates.is_empty() {
            return Err(MockError::Empty(path.to_path_buf()));
        }

        Ok(Self { estimates })
    }

    pub fn new(estimates: Vec<Estimate>) -> Self {
        Self { estimates }
    }

    pub fn len(&self) -> usize {
        self.estimates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.estimates.is_empty()
    }

    /// Answer a comparison.
    ///
    /// Returns the estimates for the requested category with deep links
    /// for this trip, cheapest first and then by ETA.
    pub fn estimates_for(&self, request: &TripRequest) -> Vec<Estimate> {
        let wanted = NormalizedCategory::Known(request.category);

        let mut matching: Vec<Estimate> = self
            .estimates
            .iter()
            .filter(|e| e.normalized_category == wanted)
            .map(|e| Estimate {
                redirect_url: redirect_url(&e.provider, request),
                ..e.clone()
            })
            .collect();

        matching.sort_by(|a, b| {
            a.estimated_price
                .total_cmp(&b.estimated_price)
                .then(a.eta_minutes.cmp(&b.eta_minutes))
        });

        matching
    }
}
