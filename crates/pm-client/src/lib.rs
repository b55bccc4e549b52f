//! pm-client: Postmark API client
//!
//! Typed HTTP client for the Postmark transactional-email API. Each
//! method issues exactly one request; retries and backoff are left to
//! callers that need them.

pub mod client;
pub mod error;
pub mod models;

pub use client::PostmarkClient;
pub use error::{PostmarkError, Result};
pub use models::*;
