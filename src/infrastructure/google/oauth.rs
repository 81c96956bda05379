//! OAuth2 JWT-bearer token exchange for service accounts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::clients::TokenProvider;
use crate::domain::entities::{AccessToken, Credential};
use crate::error::TokenError;

/// Grant type for the service-account assertion flow (RFC 7523).
pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for the signed assertion; Google caps it at one hour.
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Used when the token endpoint omits `expires_in`.
const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
struct AssertionClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OAuthErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Mints access tokens by signing an RS256 assertion with the service
/// account's private key and posting it to the credential's `token_uri`.
#[derive(Debug, Clone)]
pub struct ServiceAccountTokenProvider {
    client: Client,
}

impl ServiceAccountTokenProvider {
    /// `client` should carry the outbound timeout.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TokenProvider for ServiceAccountTokenProvider {
    async fn fetch_token(
        &self,
        credential: &Credential,
        scopes: &[String],
    ) -> Result<AccessToken, TokenError> {
        let assertion = sign_assertion(credential, scopes, Utc::now())?;

        let response = self
            .client
            .post(&credential.token_uri)
            .form(&[
                ("grant_type", JWT_BEARER_GRANT),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(classify_error(status.as_u16(), &body));
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| TokenError::MalformedResponse(e.to_string()))?;

        if token.access_token.is_empty() {
            return Err(TokenError::MalformedResponse(
                "empty access_token".to_string(),
            ));
        }

        let expires_in = token.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);
        AccessToken::expiring_in(token.access_token, expires_in).ok_or_else(|| {
            TokenError::MalformedResponse(format!("expires_in out of range: {expires_in}"))
        })
    }
}

/// Builds the signed JWT presented as the grant assertion.
fn sign_assertion(
    credential: &Credential,
    scopes: &[String],
    now: DateTime<Utc>,
) -> Result<String, TokenError> {
    let iat = now.timestamp();
    let claims = AssertionClaims {
        iss: credential.client_email.clone(),
        scope: scopes.join(" "),
        aud: credential.token_uri.clone(),
        iat,
        exp: iat + ASSERTION_LIFETIME_SECS,
    };

    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(credential.private_key_id.clone());

    let key = EncodingKey::from_rsa_pem(credential.private_key.as_bytes())
        .map_err(|e| TokenError::Signing(e.to_string()))?;

    encode(&header, &claims, &key).map_err(|e| TokenError::Signing(e.to_string()))
}

/// Maps a failed token response onto [`TokenError`].
///
/// The structured OAuth error (`invalid_grant` plus its description) is
/// preferred; bodies that are not OAuth JSON are matched on their text.
fn classify_error(status: u16, body: &str) -> TokenError {
    match serde_json::from_str::<OAuthErrorResponse>(body) {
        Ok(oauth) => {
            let description = oauth.error_description.unwrap_or_default();
            if oauth.error == "invalid_grant" && mentions_invalid_signature(&description) {
                TokenError::InvalidSignature(format!("{}: {}", oauth.error, description))
            } else {
                TokenError::Rejected {
                    status,
                    code: oauth.error,
                    description,
                }
            }
        }
        Err(_) if mentions_invalid_signature(body) => {
            TokenError::InvalidSignature(body.trim().to_string())
        }
        Err(_) => TokenError::Rejected {
            status,
            code: "unknown".to_string(),
            description: body.trim().to_string(),
        },
    }
}

fn mentions_invalid_signature(text: &str) -> bool {
    text.to_ascii_lowercase().contains("invalid jwt signature")
}
