//! HTTP request/response tracing middleware.

use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::Level;

/// Creates the access-log layer wrapped around every route.
///
/// Each request gets an `INFO` span carrying method, URI, and version.
/// Request start is logged at `DEBUG`, the response (status and latency in
/// milliseconds) at `INFO`, and 5xx responses additionally at `ERROR`.
///
/// Bodies and headers are never recorded: requests may carry inline
/// service-account keys.
///
/// # Example Logs
///
/// ```text
/// INFO request{method=POST uri=/submit-urls version=HTTP/1.1}: finished processing request latency=812 ms status=200
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_failure(
            DefaultOnFailure::new()
                .level(Level::ERROR)
                .latency_unit(LatencyUnit::Millis),
        )
}
