//! Application layer: services and use cases
//!
//! This layer maps intents onto transport calls and decodes the answers.

pub mod envelope;
pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
