//! Error types and their HTTP representation.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Failure of a single token exchange attempt.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Usually clock skew between this host and the token endpoint.
    #[error("Invalid JWT Signature: {0}")]
    InvalidSignature(String),

    #[error("token endpoint rejected the request ({status}): {code}: {description}")]
    Rejected {
        status: u16,
        code: String,
        description: String,
    },

    #[error("failed to sign JWT assertion: {0}")]
    Signing(String),

    #[error("token request timed out: {0}")]
    Timeout(String),

    #[error("token request failed: {0}")]
    Transport(String),

    #[error("malformed token response: {0}")]
    MalformedResponse(String),
}

impl TokenError {
    /// Only signature failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TokenError::InvalidSignature(_))
    }
}

impl From<reqwest::Error> for TokenError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TokenError::Timeout(e.to_string())
        } else {
            TokenError::Transport(e.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Service account credentials not found")]
    CredentialNotFound,

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid service account credentials: {0}")]
    CredentialInvalid(String),

    #[error("Failed to obtain access token: {0}")]
    TokenAcquisition(TokenError),

    #[error("Request timed out: {0}")]
    NetworkTimeout(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{0}")]
    Unexpected(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::CredentialNotFound => "credential_not_found",
            AppError::MissingFields(_) | AppError::CredentialInvalid(_) => "credential_invalid",
            AppError::TokenAcquisition(_) => "token_acquisition_failed",
            AppError::NetworkTimeout(_) => "network_timeout",
            AppError::InvalidUrl(_) => "invalid_url",
            AppError::Validation { .. } => "validation_error",
            AppError::Unexpected(_) => "internal_error",
        }
    }

    fn details(&self) -> Value {
        match self {
            AppError::MissingFields(fields) => json!({ "missing_fields": fields }),
            AppError::Validation { details, .. } => details.clone(),
            _ => json!({}),
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        ErrorInfo {
            code: self.code(),
            message: self.to_string(),
            details: self.details(),
        }
    }
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Timeout(message) => AppError::NetworkTimeout(message),
            other => AppError::TokenAcquisition(other),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AppError::NetworkTimeout(e.to_string())
        } else {
            AppError::Unexpected(e.to_string())
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Request validation failed", details)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.code(), "{}", self);
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_message_lists_fields() {
        let err = AppError::MissingFields(vec!["private_key", "client_email"]);
        assert_eq!(
            err.to_string(),
            "Missing required fields: private_key, client_email"
        );
        assert_eq!(
            err.to_error_info().details,
            json!({ "missing_fields": ["private_key", "client_email"] })
        );
    }

    #[test]
    fn test_only_invalid_signature_is_retryable() {
        assert!(TokenError::InvalidSignature("skew".into()).is_retryable());
        assert!(!TokenError::Timeout("slow".into()).is_retryable());
        assert!(
            !TokenError::Rejected {
                status: 400,
                code: "invalid_grant".into(),
                description: "Invalid email or User ID".into(),
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_token_timeout_maps_to_network_timeout() {
        let err: AppError = TokenError::Timeout("deadline".into()).into();
        assert!(matches!(err, AppError::NetworkTimeout(_)));

        let err: AppError = TokenError::Signing("bad pem".into()).into();
        assert!(matches!(err, AppError::TokenAcquisition(_)));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::bad_request("nope", json!({})).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::CredentialNotFound.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::NetworkTimeout("t".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
