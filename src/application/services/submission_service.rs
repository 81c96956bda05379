//! URL submission service.

use std::sync::Arc;

use crate::application::retry::RetryPolicy;
use crate::domain::clients::{IndexingGateway, PublishRequest, TokenProvider};
use crate::domain::entities::{AccessToken, Credential, SubmissionRequest, SubmissionResult};
use crate::error::{AppError, TokenError};

/// OAuth scope granting write access to the Indexing API.
pub const INDEXING_SCOPE: &str = "https://www.googleapis.com/auth/indexing";

/// Acquires bearer tokens and relays URL notifications.
///
/// # Call Lifecycle
///
/// 1. One token is acquired per call, retried on signature errors only
/// 2. A token failure aborts the whole call
/// 3. Each URL is then published independently; upstream rejections and
///    local failures become unsuccessful [`SubmissionResult`]s
pub struct SubmissionService<T: TokenProvider, G: IndexingGateway> {
    token_provider: Arc<T>,
    gateway: Arc<G>,
    retry_policy: RetryPolicy,
    default_scopes: Vec<String>,
}

impl<T: TokenProvider, G: IndexingGateway> SubmissionService<T, G> {
    /// Creates a new submission service.
    ///
    /// An empty `default_scopes` falls back to [`INDEXING_SCOPE`].
    pub fn new(
        token_provider: Arc<T>,
        gateway: Arc<G>,
        retry_policy: RetryPolicy,
        default_scopes: Vec<String>,
    ) -> Self {
        let default_scopes = if default_scopes.is_empty() {
            vec![INDEXING_SCOPE.to_string()]
        } else {
            default_scopes
        };

        Self {
            token_provider,
            gateway,
            retry_policy,
            default_scopes,
        }
    }

    pub fn default_scopes(&self) -> &[String] {
        &self.default_scopes
    }

    /// Obtains a bearer token for `credential`.
    ///
    /// `scopes` overrides the default scope set unless it is absent or empty.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::TokenAcquisition`] (or [`AppError::NetworkTimeout`])
    /// with the last exchange error once the retry policy gives up.
    pub async fn acquire_token(
        &self,
        credential: &Credential,
        scopes: Option<&[String]>,
    ) -> Result<AccessToken, AppError> {
        let scopes = match scopes {
            Some(s) if !s.is_empty() => s,
            _ => self.default_scopes.as_slice(),
        };

        let token = self
            .retry_policy
            .run(
                || self.token_provider.fetch_token(credential, scopes),
                TokenError::is_retryable,
            )
            .await?;

        tracing::debug!(
            client_email = %credential.client_email,
            expires_at = %token.expires_at,
            "Access token acquired"
        );

        Ok(token)
    }

    /// Submits one URL in a single-request context.
    ///
    /// Upstream non-200 answers are still returned as results; only token
    /// and transport failures are errors.
    ///
    /// # Errors
    ///
    /// See [`Self::acquire_token`] and [`IndexingGateway::publish`].
    pub async fn submit_one(
        &self,
        credential: &Credential,
        request: &SubmissionRequest,
        scopes: Option<&[String]>,
    ) -> Result<SubmissionResult, AppError> {
        let token = self.acquire_token(credential, scopes).await?;
        self.publish(&token, credential, request).await
    }

    /// Submits a batch of URLs with a single token.
    ///
    /// Returns one result per request, in input order. Once the token is held
    /// no item can fail the batch: local errors are folded into results with
    /// status 500.
    ///
    /// # Errors
    ///
    /// Only token acquisition failures, see [`Self::acquire_token`].
    pub async fn submit_batch(
        &self,
        credential: &Credential,
        requests: &[SubmissionRequest],
        scopes: Option<&[String]>,
    ) -> Result<Vec<SubmissionResult>, AppError> {
        let token = self.acquire_token(credential, scopes).await?;

        let mut results = Vec::with_capacity(requests.len());
        for request in requests {
            let result = match self.publish(&token, credential, request).await {
                Ok(result) => result,
                Err(err) => {
                    tracing::warn!(url = %request.url, "Submission failed: {}", err);
                    SubmissionResult::failed(request, err)
                }
            };
            results.push(result);
        }

        let accepted = results.iter().filter(|r| r.success).count();
        tracing::info!(
            total = results.len(),
            accepted,
            rejected = results.len() - accepted,
            "Batch submission finished"
        );

        Ok(results)
    }

    async fn publish(
        &self,
        token: &AccessToken,
        credential: &Credential,
        request: &SubmissionRequest,
    ) -> Result<SubmissionResult, AppError> {
        let project_id = request
            .project_id
            .clone()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| credential.project_id.clone());

        let publish_request = PublishRequest {
            url: request.url.clone(),
            change_type: request.change_type,
            project_id: Some(project_id).filter(|p| !p.is_empty()),
        };

        let response = self.gateway.publish(token, &publish_request).await?;

        if response.status == 200 {
            tracing::info!(url = %request.url, change_type = %request.change_type, "URL submitted");
            Ok(SubmissionResult::accepted(request))
        } else {
            tracing::warn!(
                url = %request.url,
                status = response.status,
                "Indexing API rejected URL"
            );
            Ok(SubmissionResult::rejected(
                request,
                response.status,
                response.body,
            ))
        }
    }
}
