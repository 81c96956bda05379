//! Domain layer containing the relay's entities and outbound contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Credential, submission, and token types
//! - [`clients`] - Outbound call trait definitions
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Client traits define contracts implemented by the infrastructure layer
//! - Orchestration lives in services (see [`crate::application::services`])

pub mod clients;
pub mod entities;
