//! Infrastructure layer for external integrations.
//!
//! This layer implements the client traits defined by the domain layer
//! with real HTTPS calls.
//!
//! # Modules
//!
//! - [`google`] - OAuth2 token exchange and Indexing API client

pub mod google;
