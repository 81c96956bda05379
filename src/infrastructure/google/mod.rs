//! Google API clients.
//!
//! - [`ServiceAccountTokenProvider`] - token endpoint (`oauth2.googleapis.com`)
//! - [`IndexingApiClient`] - Indexing API publish endpoint

pub mod indexing;
pub mod oauth;

pub use indexing::{INDEXING_API_ENDPOINT, IndexingApiClient};
pub use oauth::ServiceAccountTokenProvider;
