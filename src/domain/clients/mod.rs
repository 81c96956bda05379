//! Outbound client trait definitions for the domain layer.
//!
//! These traits abstract the two network calls a submission makes so the
//! application services can be exercised without a network.
//!
//! # Architecture
//!
//! - Traits define the contract for outbound calls
//! - Implementations live in `crate::infrastructure::google`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Clients
//!
//! - [`TokenProvider`] - Service-account credential to bearer token exchange
//! - [`IndexingGateway`] - URL notification publishing

pub mod indexing_gateway;
pub mod token_provider;

pub use indexing_gateway::{IndexingGateway, PublishRequest, PublishResponse};
pub use token_provider::TokenProvider;

#[cfg(test)]
pub use indexing_gateway::MockIndexingGateway;
#[cfg(test)]
pub use token_provider::MockTokenProvider;
