//! Service-account credential resolution.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;
use std::path::PathBuf;

use crate::domain::entities::{Credential, RawCredential};
use crate::error::AppError;

/// Where a credential may come from besides the request itself.
///
/// Built from [`crate::config::Config`]; the resolver never reads the
/// environment on its own.
#[derive(Clone, Default)]
pub struct CredentialConfig {
    /// Base64-encoded service-account JSON.
    pub env_blob: Option<String>,
    /// Path to a service-account key file.
    pub file_path: PathBuf,
}

impl fmt::Debug for CredentialConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialConfig")
            .field("env_blob", &self.env_blob.as_ref().map(|_| "<set>"))
            .field("file_path", &self.file_path)
            .finish()
    }
}

/// The source that produced a resolved credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    Inline,
    Environment,
    File(PathBuf),
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Inline => f.write_str("request body"),
            CredentialSource::Environment => f.write_str("environment"),
            CredentialSource::File(path) => write!(f, "file {}", path.display()),
        }
    }
}

/// Produces a validated [`Credential`] from the first available source.
///
/// # Resolution Order
///
/// 1. Inline credential supplied with the request
/// 2. Base64-encoded JSON from the environment
/// 3. Key file on disk
///
/// A source that is present but broken is an error; resolution does not fall
/// through to the next source.
#[derive(Debug, Clone)]
pub struct CredentialResolver {
    config: CredentialConfig,
}

impl CredentialResolver {
    pub fn new(config: CredentialConfig) -> Self {
        Self { config }
    }

    /// Resolves a credential, discarding which source supplied it.
    ///
    /// # Errors
    ///
    /// - [`AppError::CredentialNotFound`] if no source is available
    /// - [`AppError::MissingFields`] if required fields are absent
    /// - [`AppError::CredentialInvalid`] if a source cannot be decoded or parsed
    pub async fn resolve(&self, inline: Option<RawCredential>) -> Result<Credential, AppError> {
        self.resolve_with_source(inline)
            .await
            .map(|(credential, _)| credential)
    }

    /// Resolves a credential and reports which source supplied it.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve`].
    pub async fn resolve_with_source(
        &self,
        inline: Option<RawCredential>,
    ) -> Result<(Credential, CredentialSource), AppError> {
        let (raw, source) = self.load(inline).await?;
        let credential = match source {
            CredentialSource::Inline => raw.into_inline_credential()?,
            _ => raw.into_credential()?,
        };

        tracing::debug!(
            source = %source,
            client_email = %credential.client_email,
            "Service account credential resolved"
        );

        Ok((credential, source))
    }

    async fn load(
        &self,
        inline: Option<RawCredential>,
    ) -> Result<(RawCredential, CredentialSource), AppError> {
        if let Some(raw) = inline {
            return Ok((raw, CredentialSource::Inline));
        }

        if let Some(blob) = self.config.env_blob.as_deref().filter(|b| !b.trim().is_empty()) {
            return Ok((decode_blob(blob)?, CredentialSource::Environment));
        }

        let path = &self.config.file_path;
        if tokio::fs::try_exists(path).await.unwrap_or(false) {
            let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
                AppError::CredentialInvalid(format!("cannot read {}: {e}", path.display()))
            })?;
            let raw = serde_json::from_str(&contents).map_err(|e| {
                AppError::CredentialInvalid(format!("{} is not valid JSON: {e}", path.display()))
            })?;
            return Ok((raw, CredentialSource::File(path.clone())));
        }

        Err(AppError::CredentialNotFound)
    }
}

/// Decodes base64-encoded service-account JSON.
fn decode_blob(blob: &str) -> Result<RawCredential, AppError> {
    let bytes = STANDARD
        .decode(blob.trim())
        .map_err(|e| AppError::CredentialInvalid(format!("invalid base64: {e}")))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| AppError::CredentialInvalid(format!("invalid credential JSON: {e}")))
}
