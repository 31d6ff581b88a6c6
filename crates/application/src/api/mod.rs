//! API client and auth strategies
//!
//! One polymorphic HTTP client over the transport port, configured with
//! an interchangeable [`AuthStrategy`] per use site.

mod auth;
mod client;

pub use auth::{AuthStrategy, BearerAuth, ExpiredCallback, SessionAuth};
pub use client::ApiClient;
