//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent lookups and inputs that cannot be satisfied.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("couldn't find any rooms for search {search:?}")]
    RoomNotFound { search: String },

    #[error("unrecognised date {input:?} (expected YYYY-MM-DD)")]
    InvalidDate { input: String },
}
