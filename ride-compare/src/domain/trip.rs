//! Trip requests sent to the comparison backend.

use serde::{Deserialize, Serialize};

use super::coords::validate;
use super::{Coordinates, RideCategory};

/// Pickup, dropoff and category for one comparison.
///
/// Built from two resolved [`Coordinates`], so a request with a missing
/// endpoint cannot be constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    pub pickup_lat: f64,
    pub pickup_lng: f64,
    pub drop_lat: f64,
    pub drop_lng: f64,
    pub category: RideCategory,
}

impl TripRequest {
    /// Create a request between two resolved locations.
    pub fn new(pickup: &Coordinates, dropoff: &Coordinates, category: RideCategory) -> Self {
        Self {
            pickup_lat: pickup.latitude(),
            pickup_lng: pickup.longitude(),
            drop_lat: dropoff.latitude(),
            drop_lng: dropoff.longitude(),
            category,
        }
    }

    /// Whether every coordinate lies within the valid ranges.
    ///
    /// Always true for requests built with [`TripRequest::new`]; used to
    /// check requests deserialized from elsewhere.
    pub fn in_range(&self) -> bool {
        validate(self.pickup_lat, self.pickup_lng).is_ok()
            && validate(self.drop_lat, self.drop_lng).is_ok()
    }
}

/// Screen-level trip being assembled by the user.
///
/// Either endpoint may still be unresolved. A [`TripRequest`] is only
/// available once both are set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripDraft {
    pub pickup: Option<Coordinates>,
    pub dropoff: Option<Coordinates>,
    pub category: RideCategory,
}

impl TripDraft {
    pub fn new(category: RideCategory) -> Self {
        Self {
            pickup: None,
            dropoff: None,
            category,
        }
    }

    /// Exchange pickup and dropoff.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.pickup, &mut self.dropoff);
    }

    /// Whether a compare may be started: both endpoints resolved and no
    /// comparison currently loading.
    pub fn can_compare(&self, loading: bool) -> bool {
        self.pickup.is_some() && self.dropoff.is_some() && !loading
    }

    /// The request for this draft, or `None` while an endpoint is missing.
    pub fn to_request(&self) -> Option<TripRequest> {
        match (&self.pickup, &self.dropoff) {
            (Some(pickup), Some(dropoff)) => {
                Some(TripRequest::new(pickup, dropoff, self.category))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seattle() -> Coordinates {
        Coordinates::new(47.6062, -122.3321, "Seattle").unwrap()
    }

    fn tacoma() -> Coordinates {
        Coordinates::new(47.2529, -122.4443, "Tacoma").unwrap()
    }

    #[test]
    fn request_serializes_snake_case() {
        let request = TripRequest::new(&seattle(), &tacoma(), RideCategory::Xl);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["pickup_lat"], 47.6062);
        assert_eq!(json["pickup_lng"], -122.3321);
        assert_eq!(json["drop_lat"], 47.2529);
        assert_eq!(json["drop_lng"], -122.4443);
        assert_eq!(json["category"], "XL");
    }

    #[test]
    fn in_range_detects_bad_values() {
        let mut request = TripRequest::new(&seattle(), &tacoma(), RideCategory::Standard);
        assert!(request.in_range());

        request.drop_lat = 999.0;
        assert!(!request.in_range());
    }

    // Requests and coordinates share one range rule
    #[test]
    fn in_range_matches_coordinate_validation() {
        let positions = [
            (90.0, 180.0),
            (-90.0, -180.0),
            (90.5, 0.0),
            (0.0, -180.5),
            (f64::NAN, 0.0),
            (0.0, f64::INFINITY),
        ];

        for (lat, lng) in positions {
            let mut request = TripRequest::new(&seattle(), &tacoma(), RideCategory::Standard);
            request.pickup_lng = lng;
            request.pickup_lat = lat;

            assert_eq!(
                request.in_range(),
                Coordinates::new(lat, lng, "edge").is_ok(),
                "({lat}, {lng})"
            );
        }
    }

    #[test]
    fn draft_needs_both_endpoints() {
        let mut draft = TripDraft::new(RideCategory::Standard);
        assert!(draft.to_request().is_none());
        assert!(!draft.can_compare(false));

        draft.pickup = Some(seattle());
        assert!(draft.to_request().is_none());

        draft.dropoff = Some(tacoma());
        assert!(draft.can_compare(false));
        assert!(!draft.can_compare(true));

        let request = draft.to_request().unwrap();
        assert_eq!(request.pickup_lat, 47.6062);
        assert_eq!(request.drop_lat, 47.2529);
    }

    #[test]
    fn swap_exchanges_endpoints() {
        let mut draft = TripDraft::new(RideCategory::Premium);
        draft.pickup = Some(seattle());
        draft.swap();

        assert!(draft.pickup.is_none());
        assert_eq!(draft.dropoff.as_ref().map(|c| c.label()), Some("Seattle"));
    }
}
