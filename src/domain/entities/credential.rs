//! Service-account credential entity.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AppError;

/// Token endpoint used when a credential does not declare its own `token_uri`.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Authorization endpoint used when a credential does not declare its own `auth_uri`.
pub const DEFAULT_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";

/// Fields every credential source must provide.
const REQUIRED_FIELDS: usize = 5;

/// `client_id`, `auth_uri`, and `token_uri`, required only inline.
const INLINE_EXTRA_FIELDS: usize = 3;

/// Expected value of the `type` field.
pub const SERVICE_ACCOUNT_TYPE: &str = "service_account";

/// Service-account JSON exactly as it arrives from a request body, the
/// environment, or a key file.
///
/// Every field is optional so that missing fields can be reported together
/// by [`RawCredential::into_credential`] instead of failing on the first one
/// during deserialization.
#[derive(Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct RawCredential {
    #[serde(rename = "type")]
    pub account_type: Option<String>,
    pub project_id: Option<String>,
    pub private_key_id: Option<String>,
    pub private_key: Option<String>,
    pub client_email: Option<String>,
    pub client_id: Option<String>,
    pub auth_uri: Option<String>,
    pub token_uri: Option<String>,
    pub auth_provider_x509_cert_url: Option<String>,
    pub client_x509_cert_url: Option<String>,
}

impl RawCredential {
    /// Validates required fields and normalizes the private key.
    ///
    /// Required fields are checked in declaration order: `type`, `project_id`,
    /// `private_key_id`, `private_key`, `client_email`. A field that is present
    /// but blank counts as missing. Absent `auth_uri` and `token_uri` fall back
    /// to Google's endpoints.
    ///
    /// # Errors
    ///
    /// - [`AppError::MissingFields`] listing every absent required field
    /// - [`AppError::CredentialInvalid`] if `type` is not `service_account`
    pub fn into_credential(self) -> Result<Credential, AppError> {
        self.validate(REQUIRED_FIELDS)
    }

    /// Like [`Self::into_credential`], but a credential sent in a request body
    /// must also carry `client_id`, `auth_uri`, and `token_uri`.
    ///
    /// # Errors
    ///
    /// See [`Self::into_credential`].
    pub fn into_inline_credential(self) -> Result<Credential, AppError> {
        self.validate(REQUIRED_FIELDS + INLINE_EXTRA_FIELDS)
    }

    /// Checks the first `required` fields of [`Self::fields`].
    fn validate(self, required: usize) -> Result<Credential, AppError> {
        let missing: Vec<&'static str> = self
            .fields()
            .iter()
            .take(required)
            .filter(|(_, value)| is_blank(value))
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            return Err(AppError::MissingFields(missing));
        }

        let account_type = self.account_type.unwrap_or_default();
        if account_type != SERVICE_ACCOUNT_TYPE {
            return Err(AppError::CredentialInvalid(format!(
                "expected type '{SERVICE_ACCOUNT_TYPE}', got '{account_type}'"
            )));
        }

        Ok(Credential {
            account_type,
            project_id: self.project_id.unwrap_or_default(),
            private_key_id: self.private_key_id.unwrap_or_default(),
            private_key: normalize_private_key(&self.private_key.unwrap_or_default()),
            client_email: self.client_email.unwrap_or_default(),
            client_id: non_blank(self.client_id),
            auth_uri: non_blank(self.auth_uri).unwrap_or_else(|| DEFAULT_AUTH_URI.to_string()),
            token_uri: non_blank(self.token_uri).unwrap_or_else(|| DEFAULT_TOKEN_URI.to_string()),
            auth_provider_x509_cert_url: non_blank(self.auth_provider_x509_cert_url),
            client_x509_cert_url: non_blank(self.client_x509_cert_url),
        })
    }

    /// Checkable fields in declaration order.
    fn fields(&self) -> [(&'static str, &Option<String>); 8] {
        [
            ("type", &self.account_type),
            ("project_id", &self.project_id),
            ("private_key_id", &self.private_key_id),
            ("private_key", &self.private_key),
            ("client_email", &self.client_email),
            ("client_id", &self.client_id),
            ("auth_uri", &self.auth_uri),
            ("token_uri", &self.token_uri),
        ]
    }
}

impl fmt::Debug for RawCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawCredential")
            .field("type", &self.account_type)
            .field("project_id", &self.project_id)
            .field("private_key_id", &self.private_key_id)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("client_email", &self.client_email)
            .finish_non_exhaustive()
    }
}

/// A validated service-account credential.
///
/// Constructed only through [`RawCredential::into_credential`], so the
/// required fields are always non-empty and `private_key` always contains
/// real line breaks.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub account_type: String,
    pub project_id: String,
    pub private_key_id: String,
    pub private_key: String,
    pub client_email: String,
    pub client_id: Option<String>,
    pub auth_uri: String,
    pub token_uri: String,
    pub auth_provider_x509_cert_url: Option<String>,
    pub client_x509_cert_url: Option<String>,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("project_id", &self.project_id)
            .field("private_key_id", &self.private_key_id)
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

/// Replaces literal `\n` escape sequences with real line breaks.
///
/// Only applies when the key has escapes but no real newline, which makes the
/// operation idempotent: an already-normalized key is returned unchanged.
pub fn normalize_private_key(key: &str) -> String {
    if key.contains("\\n") && !key.contains('\n') {
        key.replace("\\n", "\n")
    } else {
        key.to_string()
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
