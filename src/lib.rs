//! # Indexing Relay
//!
//! A thin HTTP relay that forwards URL change notifications to the Google
//! Indexing API, authenticated with a service-account credential.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Credential and submission entities, outbound client traits
//! - **Application Layer** ([`application`]) - Credential resolution, token retry, batch submission
//! - **Infrastructure Layer** ([`infrastructure`]) - OAuth2 token exchange and Indexing API client
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Request Flow
//!
//! 1. Resolve a credential: inline request data, then environment blob, then key file
//! 2. Exchange it for a bearer token (JWT-bearer grant), retrying signature errors
//! 3. Publish each URL; every URL yields exactly one result
//!
//! ## Quick Start
//!
//! ```bash
//! export GOOGLE_SERVICE_ACCOUNT_BASE64="$(base64 -w0 service-account.json)"
//! cargo run
//!
//! curl -X POST localhost:8000/submit-url \
//!   -H 'Content-Type: application/json' \
//!   -d '{"url": "https://example.com/page", "type": "URL_UPDATED"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod routes;
pub mod server;
pub mod state;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::retry::RetryPolicy;
    pub use crate::application::services::{
        CredentialConfig, CredentialResolver, CredentialSource, SubmissionService,
    };
    pub use crate::domain::entities::{
        AccessToken, ChangeType, Credential, RawCredential, SubmissionRequest, SubmissionResult,
    };
    pub use crate::error::{AppError, TokenError};
    pub use crate::infrastructure::google::{IndexingApiClient, ServiceAccountTokenProvider};
    pub use crate::state::{AppState, IndexingSubmissionService};
}
