//! Provider deep links.

use reqwest::Url;

use crate::domain::TripRequest;

const UBER_URL: &str = "https://m.uber.com/ul/";
const LYFT_URL: &str = "https://lyft.com/ride";

/// Deep link opening the provider's app on this trip.
///
/// Empty for providers without a known link format.
pub fn redirect_url(provider: &str, request: &TripRequest) -> String {
    let pickup_lat = request.pickup_lat.to_string();
    let pickup_lng = request.pickup_lng.to_string();
    let drop_lat = request.drop_lat.to_string();
    let drop_lng = request.drop_lng.to_string();

    let built = match provider {
        "Uber" => Url::parse_with_params(
            UBER_URL,
            &[
                ("action", "setPickup"),
                ("pickup[latitude]", pickup_lat.as_str()),
                ("pickup[longitude]", pickup_lng.as_str()),
                ("dropoff[latitude]", drop_lat.as_str()),
                ("dropoff[longitude]", drop_lng.as_str()),
            ],
        ),
        "Lyft" => Url::parse_with_params(
            LYFT_URL,
            &[
                ("pickup[latitude]", pickup_lat.as_str()),
                ("pickup[longitude]", pickup_lng.as_str()),
                ("destination[latitude]", drop_lat.as_str()),
                ("destination[longitude]", drop_lng.as_str()),
            ],
        ),
        _ => return String::new(),
    };

    built.map(String::from).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RideCategory;

    fn request() -> TripRequest {
        TripRequest {
            pickup_lat: 47.6062,
            pickup_lng: -122.3321,
            drop_lat: 47.4502,
            drop_lng: -122.3088,
            category: RideCategory::Standard,
        }
    }

    #[test]
    fn uber_link() {
        let url = redirect_url("Uber", &request());

        assert!(url.starts_with("https://m.uber.com/ul/?action=setPickup&"));
        assert!(url.contains("pickup%5Blatitude%5D=47.6062"));
        assert!(url.contains("pickup%5Blongitude%5D=-122.3321"));
        assert!(url.contains("dropoff%5Blatitude%5D=47.4502"));
        assert!(url.contains("dropoff%5Blongitude%5D=-122.3088"));
    }

    #[test]
    fn lyft_link() {
        let url = redirect_url("Lyft", &request());

        assert!(url.starts_with("https://lyft.com/ride?"));
        assert!(url.contains("pickup%5Blatitude%5D=47.6062"));
        assert!(url.contains("destination%5Blatitude%5D=47.4502"));
        assert!(url.contains("destination%5Blongitude%5D=-122.3088"));
    }

    #[test]
    fn unknown_provider_has_no_link() {
        assert_eq!(redirect_url("Via", &request()), "");
    }
}
