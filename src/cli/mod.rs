//! CLI layer: argument parsing, intent validation, dispatch and rendering

pub mod args;
pub mod commands;
pub mod error;
pub mod intent;
pub mod output;
pub mod render;

pub use args::{Cli, Commands};
pub use error::{CliError, CliResult};
pub use intent::{Intent, RoomChoice};
