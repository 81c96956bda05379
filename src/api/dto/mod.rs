//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Submission results are serialized directly from
//! [`crate::domain::entities::SubmissionResult`].

pub mod health;
pub mod submit;
