//! HTTP routes for the mock backend.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::domain::{Estimate, TripRequest};

use super::fixtures::EstimateFixtures;

/// Shared state for the mock backend.
#[derive(Clone)]
pub struct MockState {
    pub fixtures: Arc<EstimateFixtures>,
}

impl MockState {
    pub fn new(fixtures: EstimateFixtures) -> Self {
        Self {
            fixtures: Arc::new(fixtures),
        }
    }
}

/// Create the mock backend router.
pub fn create_router(state: MockState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/compare", post(compare))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn compare(
    State(state): State<MockState>,
    Json(request): Json<TripRequest>,
) -> Result<Json<Vec<Estimate>>, ApiError> {
    if !request.in_range() {
        return Err(ApiError::Unprocessable {
            message: "coordinates out of range".to_string(),
        });
    }

    let estimates = state.fixtures.estimates_for(&request);
    info!(category = %request.category, estimates = estimates.len(), "answered comparison");

    Ok(Json(estimates))
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

#[derive(Debug)]
enum ApiError {
    Unprocessable { message: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
        };

        warn!(%status, %message, "rejecting request");

        (status, Json(ErrorResponse { detail: message })).into_response()
    }
}
