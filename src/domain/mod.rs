//! Domain layer: entities and business rules
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod date;
pub mod entities;
pub mod error;

pub use date::{day_bounds_millis, epoch_millis, parse_booking_date};
pub use entities::*;
pub use error::DomainError;
