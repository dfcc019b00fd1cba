//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;
use crate::infrastructure::TransportError;

/// Application errors wrap domain errors and add config/transport context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("{0}")]
    Transport(#[from] TransportError),

    #[error("authentication failed: {source}. Are you on SSO? Set `session` to your ACTID cookie")]
    AuthFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("cannot decode {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot encode {context}: {source}")]
    Encode {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApplicationError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
