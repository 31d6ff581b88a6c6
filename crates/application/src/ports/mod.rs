//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external
//! systems. Each port is a trait that can be implemented by adapters in
//! the infrastructure layer.

mod http_transport;
mod key_value_store;

pub use http_transport::{HttpTransport, TransportError};
pub use key_value_store::{KeyValueStore, StoreError};
