//! Business logic services for the application layer.

pub mod credential_resolver;
pub mod submission_service;

pub use credential_resolver::{CredentialConfig, CredentialResolver, CredentialSource};
pub use submission_service::SubmissionService;
