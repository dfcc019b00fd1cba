//! Command dispatch
//!
//! Booking commands are validated into an [`Intent`] first, then executed
//! against the service container. Results go to the supplied writer.

use std::fmt::Display;
use std::io::{self, Write};

use chrono::Utc;
use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::services::IOfficeService;
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::intent::{Intent, RoomChoice};
use crate::cli::{output, render};
use crate::config::{self, Settings};
use crate::domain::{epoch_millis, ReservationRequest};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Config { command }) => execute_config(command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        command => {
            let settings = Settings::load()?;
            let intent = Intent::from_command(command.as_ref(), &settings)?;
            let container = ServiceContainer::new(settings)?;
            let stdout = io::stdout();
            let mut out = stdout.lock();
            run_intent(&intent, &container, &mut out)
        }
    }
}

fn emit(out: &mut dyn Write, line: impl Display) -> CliResult<()> {
    writeln!(out, "{line}").map_err(|e| InfraError::io("write output", e).into())
}

fn list_reservations(service: &IOfficeService, out: &mut dyn Write) -> CliResult<()> {
    let reservations = service.reservations()?;
    emit(out, render::reservation_count_line(&reservations))?;
    emit(out, render::reservations_table(&reservations))
}

/// Execute one validated intent.
///
/// Authenticates first: a failing current-user lookup aborts before the
/// intent's own request is sent.
#[instrument(skip(container, out))]
pub fn run_intent(
    intent: &Intent,
    container: &ServiceContainer,
    out: &mut dyn Write,
) -> CliResult<()> {
    let service = &container.ioffice;
    let me = service.current_user()?;

    match intent {
        Intent::List => list_reservations(service, out)?,
        Intent::Create { date, room } => {
            let room_id = match room {
                RoomChoice::Configured(id) => *id,
                RoomChoice::Search { name, building_id } => {
                    service.find_room(name, *building_id)?.id
                }
            };
            let request = ReservationRequest::all_day(
                me.id,
                container.settings.center_id,
                room_id,
                epoch_millis(*date),
            );
            debug!("booking room {} at {}", room_id, request.start_date);
            let outcome = service.create_reservation(&request)?;
            emit(out, render::booking_message(&outcome))?;
        }
        Intent::CheckIn { reservation_id } => {
            let outcome = service.check_in(*reservation_id)?;
            emit(out, render::check_in_message(&outcome))?;
        }
        Intent::Cancel { reservation_id } => {
            let outcome = service.cancel(*reservation_id)?;
            emit(out, render::cancellation_message(&outcome))?;
        }
        Intent::Buildings => emit(out, render::buildings_table(&service.buildings()?))?,
        Intent::Floors { building_id } => {
            emit(out, render::floors_table(&service.floors(*building_id)?))?
        }
        Intent::Occupancy { floor_id } => {
            let today = Utc::now().date_naive();
            emit(
                out,
                render::occupancy_table(&service.occupancy(*floor_id, today)?),
            )?
        }
    }

    if intent.relists() {
        list_reservations(service, out)?;
    }
    Ok(())
}

fn execute_config(command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load()?;
            output::info(&render::settings_table(&settings.display_entries()));
            Ok(())
        }
        ConfigCommands::Path => {
            for path in config::search_paths() {
                if path.is_file() {
                    output::success(&path.display());
                } else {
                    output::failure(&format!("{} (not found)", path.display()));
                }
            }
            Ok(())
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                config::global_config_path().ok_or_else(|| {
                    ApplicationError::config("cannot determine user config directory")
                })?
            } else {
                config::local_config_path()
            };
            if path.exists() {
                return Err(CliError::InvalidArgs(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .map_err(|e| InfraError::io(format!("create {}", parent.display()), e))?;
            }
            std::fs::write(&path, Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::action("Created", &path.display());
            Ok(())
        }
    }
}
