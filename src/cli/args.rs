//! CLI argument definitions using clap

use clap::{ArgAction, Parser, Subcommand};

/// Book desks and rooms on iOffice: list, reserve, check in, cancel
#[derive(Parser, Debug)]
#[command(name = "ioffice")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Defaults to `list`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List your upcoming reservations
    List,

    /// Reserve a room for a day
    Create {
        /// Day to book, e.g. 2024-03-01
        date: Option<String>,
        /// Room name to search for (default: configured roomID)
        room: Option<String>,
    },

    /// Check in to a reservation
    Checkin {
        /// Reservation ID
        id: u64,
    },

    /// Cancel a reservation
    Cancel {
        /// Reservation ID
        id: u64,
    },

    /// List buildings
    Buildings,

    /// List floors
    Floors {
        /// Building ID (default: configured buildingID, 0 = all)
        building_id: Option<u64>,
    },

    /// Show today's reservations on a floor
    Occupancy {
        /// Floor ID
        floor_id: Option<u64>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Show merged config (secrets masked)
    Show,

    /// Create config template
    Init {
        /// Create in the user config directory instead of the working directory
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
