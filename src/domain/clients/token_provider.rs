//! Client trait for bearer token acquisition.

use crate::domain::entities::{AccessToken, Credential};
use crate::error::TokenError;
use async_trait::async_trait;

/// Exchanges a service-account credential for a bearer token.
///
/// # Implementations
///
/// - [`crate::infrastructure::google::ServiceAccountTokenProvider`] - OAuth2 JWT-bearer grant
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Performs exactly one exchange attempt.
    ///
    /// Retrying is the caller's concern; see [`TokenError::is_retryable`].
    async fn fetch_token(
        &self,
        credential: &Credential,
        scopes: &[String],
    ) -> Result<AccessToken, TokenError>;
}
