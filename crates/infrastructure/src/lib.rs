//! Pitchside Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports defined in
//! the application layer.

pub mod http;
pub mod persistence;

pub use http::ReqwestTransport;
pub use persistence::FileKeyValueStore;
