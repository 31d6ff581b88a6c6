//! Pitchside Application - Client core orchestration
//!
//! The data-fetching, pagination, resource-caching and API-client layer
//! of the Pitchside app, written against the ports defined here and
//! implemented by the infrastructure crate.

pub mod api;
pub mod error;
pub mod fetch;
pub mod pagination;
pub mod ports;
pub mod resource;

#[cfg(test)]
mod test_support;

pub use api::{ApiClient, AuthStrategy, BearerAuth, ExpiredCallback, SessionAuth};
pub use error::{ClientError, ClientResult};
pub use fetch::{FetchState, Fetcher};
pub use pagination::Paginator;
pub use resource::{Codec, ResourceCache};
