//! API route configuration.

use crate::api::handlers::{submit_url_handler, submit_urls_handler};
use crate::state::AppState;
use axum::{Router, routing::post};

/// Submission routes.
///
/// # Endpoints
///
/// - `POST /submit-url`  - Notify about one URL
/// - `POST /submit-urls` - Notify about several URLs with a single token
pub fn submission_routes() -> Router<AppState> {
    Router::new()
        .route("/submit-url", post(submit_url_handler))
        .route("/submit-urls", post(submit_urls_handler))
}
