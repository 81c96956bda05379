//! Client trait for the Indexing API publish call.

use crate::domain::entities::{AccessToken, ChangeType};
use crate::error::AppError;
use async_trait::async_trait;

/// One publish call: the notification plus the optional quota project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    pub url: String,
    pub change_type: ChangeType,
    /// Sent as `X-Goog-User-Project` when present.
    pub project_id: Option<String>,
}

/// Raw upstream answer. Interpreting the status is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishResponse {
    pub status: u16,
    pub body: String,
}

/// Publishes URL notifications to the Indexing API.
///
/// # Implementations
///
/// - [`crate::infrastructure::google::IndexingApiClient`] - HTTPS client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IndexingGateway: Send + Sync {
    /// Sends one notification.
    ///
    /// Any HTTP status is a successful call here; only transport-level
    /// failures return an error.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if the URL cannot be parsed
    /// - [`AppError::NetworkTimeout`] if the call exceeds the timeout
    /// - [`AppError::Unexpected`] on any other transport failure
    async fn publish(
        &self,
        token: &AccessToken,
        request: &PublishRequest,
    ) -> Result<PublishResponse, AppError>;
}
