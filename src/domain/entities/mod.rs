//! Core domain entities.

pub mod access_token;
pub mod credential;
pub mod submission;

pub use access_token::AccessToken;
pub use credential::{Credential, RawCredential, normalize_private_key};
pub use submission::{ChangeType, SubmissionRequest, SubmissionResult};
