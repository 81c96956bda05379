//! Submission request and result entities.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::entities::RawCredential;

/// Message returned for every accepted notification.
pub const SUCCESS_MESSAGE: &str = "URL submitted successfully";

/// Notification kind understood by the Indexing API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    #[default]
    UrlUpdated,
    UrlDeleted,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::UrlUpdated => "URL_UPDATED",
            ChangeType::UrlDeleted => "URL_DELETED",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single URL notification to relay.
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    pub url: String,
    pub change_type: ChangeType,
    pub credential: Option<RawCredential>,
    pub project_id: Option<String>,
    pub scopes: Option<Vec<String>>,
}

impl SubmissionRequest {
    pub fn new(url: impl Into<String>, change_type: ChangeType) -> Self {
        Self {
            url: url.into(),
            change_type,
            credential: None,
            project_id: None,
            scopes: None,
        }
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }
}

/// Outcome of one submission, produced exactly once per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
    pub url: String,
    #[serde(rename = "type")]
    pub change_type: ChangeType,
}

impl SubmissionResult {
    /// The Indexing API answered 200.
    pub fn accepted(request: &SubmissionRequest) -> Self {
        Self {
            success: true,
            status_code: 200,
            message: SUCCESS_MESSAGE.to_string(),
            url: request.url.clone(),
            change_type: request.change_type,
        }
    }

    /// The Indexing API answered with any other status; `body` is kept verbatim.
    pub fn rejected(request: &SubmissionRequest, status_code: u16, body: String) -> Self {
        Self {
            success: false,
            status_code,
            message: body,
            url: request.url.clone(),
            change_type: request.change_type,
        }
    }

    /// The submission never produced an upstream response.
    pub fn failed(request: &SubmissionRequest, error: impl fmt::Display) -> Self {
        Self {
            success: false,
            status_code: 500,
            message: format!("Failed to submit URL: {error}"),
            url: request.url.clone(),
            change_type: request.change_type,
        }
    }
}
