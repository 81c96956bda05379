//! Handler for health check endpoint.

use axum::Json;

use crate::api::dto::health::HealthResponse;

/// Returns a fixed liveness payload.
///
/// # Endpoint
///
/// `GET /health`
///
/// No upstream call is made; credentials and Google endpoints are only
/// exercised by submissions.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "indexing-relay",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}
