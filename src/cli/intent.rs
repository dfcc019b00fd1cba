//! Validated booking intents
//!
//! Turns parsed CLI commands plus settings into an [`Intent`] before any
//! network call is made. Missing or malformed arguments become usage errors.

use chrono::{DateTime, Utc};

use crate::cli::args::Commands;
use crate::cli::error::{CliError, CliResult};
use crate::config::Settings;
use crate::domain::parse_booking_date;

/// Where the room for a new reservation comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomChoice {
    /// `roomID` from settings
    Configured(u64),
    /// Name search, optionally narrowed to a building
    Search {
        name: String,
        building_id: Option<u64>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    List,
    Create {
        date: DateTime<Utc>,
        room: RoomChoice,
    },
    CheckIn {
        reservation_id: u64,
    },
    Cancel {
        reservation_id: u64,
    },
    Buildings,
    Floors {
        building_id: Option<u64>,
    },
    Occupancy {
        floor_id: u64,
    },
}

/// Command overview shown on usage errors.
pub fn usage() -> String {
    let bin = env!("CARGO_PKG_NAME");
    [
        "Please use one of the following commands:".to_string(),
        String::new(),
        format!("{bin} list"),
        format!("{bin} create <yyyy-mm-dd> [room name]"),
        format!("{bin} checkin <reservation ID>"),
        format!("{bin} cancel <reservation ID>"),
        format!("{bin} buildings"),
        format!("{bin} floors [building ID]"),
        format!("{bin} occupancy <floor ID>"),
    ]
    .join("\n")
}

fn usage_error(reason: &str) -> CliError {
    CliError::Usage(format!("{reason}\n\n{}", usage()))
}

impl Intent {
    /// Validate a booking command. `None` means no subcommand: list.
    pub fn from_command(command: Option<&Commands>, settings: &Settings) -> CliResult<Self> {
        let Some(command) = command else {
            return Ok(Intent::List);
        };

        match command {
            Commands::List => Ok(Intent::List),
            Commands::Create { date, room } => {
                let date = date
                    .as_deref()
                    .ok_or_else(|| usage_error("create needs a date"))?;
                let date = parse_booking_date(date)?;
                let room = match room {
                    Some(name) => RoomChoice::Search {
                        name: name.clone(),
                        building_id: settings.building(),
                    },
                    None => RoomChoice::Configured(settings.room().ok_or_else(|| {
                        usage_error("create needs a room name, or roomID in the config")
                    })?),
                };
                Ok(Intent::Create { date, room })
            }
            Commands::Checkin { id } => Ok(Intent::CheckIn {
                reservation_id: *id,
            }),
            Commands::Cancel { id } => Ok(Intent::Cancel {
                reservation_id: *id,
            }),
            Commands::Buildings => Ok(Intent::Buildings),
            Commands::Floors { building_id } => Ok(Intent::Floors {
                building_id: match building_id {
                    Some(0) => None,
                    Some(id) => Some(*id),
                    None => settings.building(),
                },
            }),
            Commands::Occupancy { floor_id } => {
                let floor_id =
                    floor_id.ok_or_else(|| usage_error("occupancy needs a floor ID"))?;
                Ok(Intent::Occupancy { floor_id })
            }
            Commands::Config { .. } | Commands::Completion { .. } => Err(CliError::InvalidArgs(
                "not a booking command".to_string(),
            )),
        }
    }

    /// Intents that change a reservation re-list reservations afterwards.
    pub fn relists(&self) -> bool {
        matches!(
            self,
            Intent::Create { .. } | Intent::CheckIn { .. } | Intent::Cancel { .. }
        )
    }
}
