//! DTOs for URL submission endpoints.

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};
use validator::Validate;

use crate::domain::entities::{ChangeType, RawCredential, SubmissionRequest};

/// Request to notify the Indexing API about one URL.
///
/// Used as the body of `POST /submit-url` and as the element type of
/// `POST /submit-urls`.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitUrlRequest {
    /// Absolute URL to notify about.
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    /// Notification kind (defaults to `URL_UPDATED`).
    #[serde(default, rename = "type")]
    pub change_type: ChangeType,

    /// Inline service-account credential overriding the configured sources.
    pub service_account: Option<RawCredential>,

    /// Project billed for the call (defaults to the credential's project).
    #[validate(length(min = 1, max = 128))]
    pub project_id: Option<String>,

    /// OAuth scopes, as a single string or a list.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    #[serde(default)]
    pub scopes: Option<Vec<String>>,
}

impl From<SubmitUrlRequest> for SubmissionRequest {
    fn from(dto: SubmitUrlRequest) -> Self {
        Self {
            url: dto.url,
            change_type: dto.change_type,
            credential: dto.service_account,
            project_id: dto.project_id,
            scopes: dto.scopes,
        }
    }
}
