//! Integration tests for the geocoding providers and the location search
//! running on top of them, using `wiremock` servers.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ride_compare::geocode::{
    AddressSuggestion, CachedProvider, GeocodeError, LocationProvider, NominatimClient,
    NominatimConfig, PlacesClient, PlacesConfig, SuggestionCacheConfig, SuggestionProvider,
};
use ride_compare::search::{LocationSearch, SearchConfig};

fn seattle_json() -> serde_json::Value {
    json!([{
        "place_id": 297632813,
        "display_name": "Seattle, WA, USA",
        "lat": "47.6062",
        "lon": "-122.3321",
        "address": {"city": "Seattle", "state": "Washington"}
    }])
}

fn nominatim(server: &MockServer) -> NominatimClient {
    NominatimClient::new(
        NominatimConfig::new()
            .with_base_url(server.uri())
            .with_user_agent("RideCompare/1.0")
            .with_timeout(5),
    )
    .unwrap()
}

fn places(server: &MockServer) -> PlacesClient {
    PlacesClient::new(PlacesConfig::new("test-key").with_base_url(server.uri()))
}

#[tokio::test]
async fn nominatim_sends_search_parameters_and_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("format", "json"))
        .and(query_param("q", "Seattle"))
        .and(query_param("limit", "5"))
        .and(query_param("addressdetails", "1"))
        .and(header("accept-language", "en"))
        .and(header("user-agent", "RideCompare/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(seattle_json()))
        .expect(1)
        .mount(&server)
        .await;

    let suggestions = nominatim(&server).search("Seattle").await.unwrap();

    assert_eq!(
        suggestions,
        vec![AddressSuggestion::new("Seattle, WA, USA", "47.6062", "-122.3321")]
    );
}

#[tokio::test]
async fn nominatim_encodes_query_text() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Pike Place & 1st Ave"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let suggestions = nominatim(&server).search("Pike Place & 1st Ave").await.unwrap();
    assert!(suggestions.is_empty());
}

#[tokio::test]
async fn nominatim_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let err = nominatim(&server).search("Seattle").await.unwrap_err();
    assert!(matches!(err, GeocodeError::Api { status: 429, .. }));
}

#[tokio::test]
async fn nominatim_suggestion_resolves_inline() {
    let server = MockServer::start().await;
    let client = nominatim(&server);

    let coords = client
        .resolve(&AddressSuggestion::new("Seattle, WA, USA", "47.6062", "-122.3321"))
        .await
        .unwrap();
    assert_eq!(coords.latitude(), 47.6062);
    assert_eq!(coords.label(), "Seattle, WA, USA");

    let err = client
        .resolve(&AddressSuggestion::new("Nowhere", "north", "-122.3"))
        .await
        .unwrap_err();
    assert!(matches!(err, GeocodeError::InvalidCoordinates(_)));
}

#[tokio::test]
async fn places_client_is_loaded_lazily() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/autocomplete/json"))
        .and(query_param("input", "Space Needle"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "predictions": [
                {
                    "description": "Space Needle, Broad Street, Seattle, WA, USA",
                    "place_id": "ChIJ-bfVTh8VkFQRDZLQnmioK9s"
                }
            ]
        })))
        .mount(&server)
        .await;

    let client = places(&server);
    assert!(!client.is_loaded());

    let suggestions = client.autocomplete("Space Needle").await.unwrap();
    assert!(client.is_loaded());

    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].place_id.as_deref(), Some("ChIJ-bfVTh8VkFQRDZLQnmioK9s"));
    assert!(!suggestions[0].has_inline_coordinates());
}

#[tokio::test]
async fn places_zero_results_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/autocomplete/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ZERO_RESULTS",
            "predictions": []
        })))
        .mount(&server)
        .await;

    assert!(places(&server).autocomplete("zzzz").await.unwrap().is_empty());
}

#[tokio::test]
async fn places_denied_status_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/autocomplete/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        })))
        .mount(&server)
        .await;

    let err = places(&server).autocomplete("Seattle").await.unwrap_err();
    assert!(matches!(err, GeocodeError::Places { ref status } if status == "REQUEST_DENIED"));
}

#[tokio::test]
async fn places_selection_resolves_through_details() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/details/json"))
        .and(query_param("place_id", "ChIJ-bfVTh8VkFQRDZLQnmioK9s"))
        .and(query_param("fields", "geometry,formatted_address"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "result": {
                "formatted_address": "400 Broad St, Seattle, WA 98109, USA",
                "geometry": {"location": {"lat": 47.6205, "lng": -122.3493}}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let suggestion = AddressSuggestion::deferred(
        "Space Needle, Broad Street, Seattle, WA, USA",
        "ChIJ-bfVTh8VkFQRDZLQnmioK9s",
    );
    let coords = places(&server).resolve(&suggestion).await.unwrap();

    assert_eq!(coords.latitude(), 47.6205);
    assert_eq!(coords.longitude(), -122.3493);
    assert_eq!(coords.label(), "400 Broad St, Seattle, WA 98109, USA");
}

#[tokio::test]
async fn places_details_without_geometry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "result": {"formatted_address": "Somewhere"}
        })))
        .mount(&server)
        .await;

    let err = places(&server)
        .resolve(&AddressSuggestion::deferred("Somewhere", "abc"))
        .await
        .unwrap_err();
    assert!(matches!(err, GeocodeError::NoLocation(_)));
}

#[tokio::test]
async fn cached_provider_skips_repeat_lookups() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Seattle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(seattle_json()))
        .expect(1)
        .mount(&server)
        .await;

    let cached = CachedProvider::new(
        LocationProvider::Nominatim(nominatim(&server)),
        &SuggestionCacheConfig::default(),
    );

    let first = cached.suggest("Seattle").await.unwrap();
    let second = cached.suggest("Seattle").await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn location_search_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Seattle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(seattle_json()))
        .expect(1)
        .mount(&server)
        .await;

    let search = LocationSearch::new(Arc::new(nominatim(&server)), SearchConfig::new(20, 3));
    let mut rx = search.subscribe();

    search.on_input_changed("Se");
    search.on_input_changed("Sea");
    search.on_input_changed("Seattle");
    rx.borrow_and_update();

    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|v| !v.suggestions.is_empty()))
        .await
        .unwrap()
        .unwrap();
    assert!(search.view().dropdown_open);

    let suggestion = search.suggestions()[0].clone();
    let coords = search.on_suggestion_selected(&suggestion).await.unwrap();

    assert_eq!(coords.latitude(), 47.6062);
    assert_eq!(coords.longitude(), -122.3321);
    assert_eq!(coords.label(), "Seattle, WA, USA");

    let view = search.view();
    assert!(view.selected);
    assert!(view.suggestions.is_empty());
    assert!(!view.dropdown_open);
    assert_eq!(view.text, "Seattle, WA, USA");
}

#[tokio::test]
async fn location_search_swallows_provider_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let search = LocationSearch::new(Arc::new(nominatim(&server)), SearchConfig::new(20, 3));
    let generation = search.on_input_changed("Seattle");

    let view = tokio::time::timeout(Duration::from_secs(5), search.settled(generation))
        .await
        .unwrap();

    assert!(view.suggestions.is_empty());
    assert!(!view.dropdown_open);
}
