//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//! Business logic never reads the environment itself: the credential resolver,
//! token provider, and Indexing API client receive values derived from [`Config`].
//!
//! ## Credential Sources
//!
//! ```bash
//! # Either a base64-encoded service-account JSON...
//! export GOOGLE_SERVICE_ACCOUNT_BASE64="$(base64 -w0 service-account.json)"
//!
//! # ...or a key file (default: ./service-account.json)
//! export SERVICE_ACCOUNT_FILE="/etc/indexing-relay/service-account.json"
//! ```
//!
//! Credentials supplied inline with a request take priority over both.
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:$PORT`)
//! - `PORT` - Port used when `LISTEN` is unset (default: `8000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `INDEXING_API_ENDPOINT` - Publish endpoint (default: Google production)
//! - `INDEXING_SCOPES` - Comma-separated OAuth scopes (default: indexing scope)
//! - `REQUEST_TIMEOUT_SECS` - Outbound request timeout (default: 30)
//! - `TOKEN_MAX_ATTEMPTS` - Token exchange attempts (default: 3)
//! - `TOKEN_RETRY_DELAY_MS` - Delay between token attempts (default: 1000)

use anyhow::Result;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::application::retry::RetryPolicy;
use crate::application::services::CredentialConfig;
use crate::application::services::submission_service::INDEXING_SCOPE;
use crate::infrastructure::google::INDEXING_API_ENDPOINT;

/// Service configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Base64-encoded service-account JSON (`GOOGLE_SERVICE_ACCOUNT_BASE64`).
    pub service_account_base64: Option<String>,
    /// Service-account key file (`SERVICE_ACCOUNT_FILE`).
    pub service_account_file: PathBuf,
    pub indexing_endpoint: String,
    /// Scopes requested when a submission does not name its own.
    pub default_scopes: Vec<String>,
    /// Timeout applied to the token exchange and to each publish call.
    pub request_timeout_secs: u64,
    pub token_max_attempts: u32,
    pub token_retry_delay_ms: u64,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("listen_addr", &self.listen_addr)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .field(
                "service_account_base64",
                &self.service_account_base64.as_ref().map(|_| "<set>"),
            )
            .field("service_account_file", &self.service_account_file)
            .field("indexing_endpoint", &self.indexing_endpoint)
            .field("default_scopes", &self.default_scopes)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("token_max_attempts", &self.token_max_attempts)
            .field("token_retry_delay_ms", &self.token_retry_delay_ms)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            service_account_base64: None,
            service_account_file: PathBuf::from("service-account.json"),
            indexing_endpoint: INDEXING_API_ENDPOINT.to_string(),
            default_scopes: vec![INDEXING_SCOPE.to_string()],
            request_timeout_secs: 30,
            token_max_attempts: 3,
            token_retry_delay_ms: 1000,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Unset or unparsable numeric values fall back to their defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let listen_addr = Self::load_listen_addr();
        let log_level = env::var("RUST_LOG").unwrap_or(defaults.log_level);
        let log_format = env::var("LOG_FORMAT").unwrap_or(defaults.log_format);

        let service_account_base64 = env::var("GOOGLE_SERVICE_ACCOUNT_BASE64")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let service_account_file = env::var("SERVICE_ACCOUNT_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.service_account_file);

        let indexing_endpoint =
            env::var("INDEXING_API_ENDPOINT").unwrap_or(defaults.indexing_endpoint);

        let default_scopes = env::var("INDEXING_SCOPES")
            .ok()
            .map(|v| parse_scopes(&v))
            .filter(|scopes| !scopes.is_empty())
            .unwrap_or(defaults.default_scopes);

        let request_timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.request_timeout_secs);

        let token_max_attempts = env::var("TOKEN_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.token_max_attempts);

        let token_retry_delay_ms = env::var("TOKEN_RETRY_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.token_retry_delay_ms);

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            service_account_base64,
            service_account_file,
            indexing_endpoint,
            default_scopes,
            request_timeout_secs,
            token_max_attempts,
            token_retry_delay_ms,
        })
    }

    /// Loads the bind address.
    ///
    /// Priority:
    /// 1. `LISTEN` environment variable
    /// 2. `0.0.0.0:$PORT` (`PORT` defaults to `8000`)
    fn load_listen_addr() -> String {
        if let Ok(listen) = env::var("LISTEN") {
            return listen;
        }

        let port = env::var("PORT").unwrap_or_else(|_| "8000".to_string());
        format!("0.0.0.0:{port}")
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `indexing_endpoint` is not an http(s) URL
    /// - `request_timeout_secs` is zero
    /// - `token_max_attempts` is not between 1 and 10
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        match url::Url::parse(&self.indexing_endpoint) {
            Ok(url) if url.scheme() == "https" || url.scheme() == "http" => {}
            _ => anyhow::bail!(
                "INDEXING_API_ENDPOINT must be an http(s) URL, got '{}'",
                self.indexing_endpoint
            ),
        }

        if self.request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be greater than 0");
        }

        if self.token_max_attempts == 0 || self.token_max_attempts > 10 {
            anyhow::bail!(
                "TOKEN_MAX_ATTEMPTS must be between 1 and 10, got {}",
                self.token_max_attempts
            );
        }

        Ok(())
    }

    pub fn credential_config(&self) -> CredentialConfig {
        CredentialConfig {
            env_blob: self.service_account_base64.clone(),
            file_path: self.service_account_file.clone(),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.token_max_attempts,
            Duration::from_millis(self.token_retry_delay_ms),
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!(
            "  Credentials: env blob {}, file {}",
            if self.service_account_base64.is_some() {
                "set"
            } else {
                "unset"
            },
            self.service_account_file.display()
        );
        tracing::info!("  Indexing endpoint: {}", self.indexing_endpoint);
        tracing::info!("  Default scopes: {}", self.default_scopes.join(" "));
        tracing::info!("  Request timeout: {}s", self.request_timeout_secs);
        tracing::info!(
            "  Token retry: {} attempts, {}ms delay",
            self.token_max_attempts,
            self.token_retry_delay_ms
        );
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

fn parse_scopes(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
