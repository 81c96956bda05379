//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod submit;

pub use health::health_handler;
pub use submit::{submit_url_handler, submit_urls_handler};
