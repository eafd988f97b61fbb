use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Router};

use super::service::CombinabilityService;
use crate::pricing::domain::{FarePath, PricingUnit};

/// Router exposing the scoreboard over HTTP.
pub fn scoreboard_router(service: Arc<CombinabilityService>) -> Router {
    Router::new()
        .route("/api/v1/pricing-units/validate", post(validate_handler))
        .route("/api/v1/fare-paths/analyze", post(analyze_handler))
        .with_state(service)
}

pub(crate) async fn validate_handler(
    State(service): State<Arc<CombinabilityService>>,
    axum::Json(pu): axum::Json<PricingUnit>,
) -> impl IntoResponse {
    let report = service.check_pricing_unit(&pu);
    (StatusCode::OK, axum::Json(report))
}

pub(crate) async fn analyze_handler(
    State(service): State<Arc<CombinabilityService>>,
    axum::Json(fare_path): axum::Json<FarePath>,
) -> impl IntoResponse {
    let report = service.check_fare_path(&fare_path);
    (StatusCode::OK, axum::Json(report))
}
