//! Application layer services implementing the relay's behaviour.
//!
//! This layer orchestrates domain operations: it resolves credentials,
//! acquires tokens under a retry policy, and drives per-URL submission.
//! Services consume the client traits from [`crate::domain::clients`] and
//! provide a clean API for HTTP handlers and the operator CLI.
//!
//! # Available Services
//!
//! - [`services::credential_resolver::CredentialResolver`] - Credential sourcing and validation
//! - [`services::submission_service::SubmissionService`] - Token acquisition and URL submission
//!
//! [`retry::RetryPolicy`] is the bounded retry primitive shared by services.

pub mod retry;
pub mod services;
