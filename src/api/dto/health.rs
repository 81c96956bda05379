//! DTOs for health check endpoint.

use serde::Serialize;

/// Liveness payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}
