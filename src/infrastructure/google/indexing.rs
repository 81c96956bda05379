//! HTTPS client for the Indexing API `urlNotifications:publish` method.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use url::Url;

use crate::domain::clients::{IndexingGateway, PublishRequest, PublishResponse};
use crate::domain::entities::{AccessToken, ChangeType};
use crate::error::AppError;

/// Production publish endpoint.
pub const INDEXING_API_ENDPOINT: &str =
    "https://indexing.googleapis.com/v3/urlNotifications:publish";

/// Header naming the project billed for the call.
pub const USER_PROJECT_HEADER: &str = "X-Goog-User-Project";

#[derive(Debug, Serialize)]
struct UrlNotification<'a> {
    url: &'a str,
    #[serde(rename = "type")]
    change_type: ChangeType,
}

/// Sends URL notifications to a configurable publish endpoint.
#[derive(Debug, Clone)]
pub struct IndexingApiClient {
    client: Client,
    endpoint: String,
}

impl IndexingApiClient {
    /// `client` should carry the outbound timeout.
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl IndexingGateway for IndexingApiClient {
    async fn publish(
        &self,
        token: &AccessToken,
        request: &PublishRequest,
    ) -> Result<PublishResponse, AppError> {
        Url::parse(&request.url)
            .map_err(|e| AppError::InvalidUrl(format!("'{}': {e}", request.url)))?;

        let notification = UrlNotification {
            url: &request.url,
            change_type: request.change_type,
        };

        let mut builder = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token.secret())
            .json(&notification);

        if let Some(project_id) = &request.project_id {
            builder = builder.header(USER_PROJECT_HEADER, project_id);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(url = %request.url, status, "Indexing API responded");

        Ok(PublishResponse { status, body })
    }
}
