//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::infrastructure::{InfraError, TransportError};

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        ApplicationError::Domain(e).into()
    }
}

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Infra(InfraError::Io { .. }) => crate::exitcode::IOERR,
            CliError::Infra(InfraError::Application(e)) => match e {
                ApplicationError::Domain(DomainError::RoomNotFound { .. }) => {
                    crate::exitcode::NOINPUT
                }
                ApplicationError::Domain(DomainError::InvalidDate { .. }) => {
                    crate::exitcode::USAGE
                }
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::AuthFailed { .. } => crate::exitcode::NOPERM,
                ApplicationError::Transport(t) if t.is_unauthorized() => crate::exitcode::NOPERM,
                ApplicationError::Transport(TransportError::Url { .. }) => crate::exitcode::CONFIG,
                ApplicationError::Transport(_) => crate::exitcode::UNAVAILABLE,
                ApplicationError::Decode { .. } => crate::exitcode::DATAERR,
                ApplicationError::Encode { .. } => crate::exitcode::SOFTWARE,
            },
        }
    }
}
