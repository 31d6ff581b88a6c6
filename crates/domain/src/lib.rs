//! Pitchside Domain - Core client types
//!
//! This crate defines the domain model for the Pitchside client core.
//! All types here are pure Rust with no I/O dependencies.

pub mod envelope;
pub mod error;
pub mod model;
pub mod request;
pub mod response;

pub use envelope::{ApiError, Envelope, Page, ResponseError, classify_error, unwrap_data};
pub use error::{DomainError, DomainResult};
pub use model::{
    CreateTeam, Gift, LoginCredentials, Post, SendGift, Team, Tokens, UpdateProfile, UserProfile,
    UserSession,
};
pub use request::{FetchOverrides, FetchRequest, HttpMethod, HttpRequest, build_url};
pub use response::{RawResponse, StatusCode};
