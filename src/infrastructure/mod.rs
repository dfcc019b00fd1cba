//! Infrastructure layer: HTTP transport and DI container
//!
//! This layer implements I/O boundary traits and wires up services.

pub mod di;
pub mod error;
pub mod http;
pub mod traits;

pub use error::InfraError;
pub use http::UreqTransport;
pub use traits::{HttpMethod, Transport, TransportError};
