//! Shared application state injected into HTTP handlers.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::application::services::{CredentialResolver, SubmissionService};
use crate::config::Config;
use crate::infrastructure::google::{IndexingApiClient, ServiceAccountTokenProvider};

/// Submission service wired to the real Google clients.
pub type IndexingSubmissionService =
    SubmissionService<ServiceAccountTokenProvider, IndexingApiClient>;

#[derive(Clone)]
pub struct AppState {
    pub credential_resolver: Arc<CredentialResolver>,
    pub submission_service: Arc<IndexingSubmissionService>,
}

impl AppState {
    pub fn new(
        credential_resolver: Arc<CredentialResolver>,
        submission_service: Arc<IndexingSubmissionService>,
    ) -> Self {
        Self {
            credential_resolver,
            submission_service,
        }
    }

    /// Builds the resolver, HTTP client, and Google clients from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        let token_provider = Arc::new(ServiceAccountTokenProvider::new(http_client.clone()));
        let gateway = Arc::new(IndexingApiClient::new(
            http_client,
            config.indexing_endpoint.clone(),
        ));

        let submission_service = Arc::new(SubmissionService::new(
            token_provider,
            gateway,
            config.retry_policy(),
            config.default_scopes.clone(),
        ));

        let credential_resolver = Arc::new(CredentialResolver::new(config.credential_config()));

        Ok(Self::new(credential_resolver, submission_service))
    }
}
