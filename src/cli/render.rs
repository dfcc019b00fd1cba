//! Console rendering of decoded records
//!
//! Tables are borderless with a styled header row and never wrap: one
//! record is one output line. Styling is applied by comfy-table only when
//! writing to a terminal.

use chrono::{DateTime, Local};
use comfy_table::presets::NOTHING;
use comfy_table::{Attribute, Cell, Color, Table};

use crate::domain::{Booking, Building, Cancellation, CheckIn, Floor, Outcome, Reservation};

const RESERVATION_HEADER: [&str; 7] = [
    "ID",
    "Start",
    "Location Name",
    "Location ID",
    "Floor",
    "Building",
    "Checked In?",
];
const OCCUPANCY_HEADER: [&str; 5] = ["ID", "Start", "Location Name", "Reserved By", "Checked In?"];
const ID_NAME_HEADER: [&str; 2] = ["ID", "Name"];

fn new_table(header: &[&str]) -> Table {
    let header: Vec<Cell> = header
        .iter()
        .map(|h| {
            Cell::new(h)
                .fg(Color::Green)
                .add_attribute(Attribute::Underlined)
        })
        .collect();
    let mut table = Table::new();
    table.load_preset(NOTHING).set_header(header);
    table
}

fn add_row(table: &mut Table, first: impl ToString, rest: Vec<String>) {
    let mut cells = vec![Cell::new(first.to_string()).fg(Color::Yellow)];
    cells.extend(rest.into_iter().map(Cell::new));
    table.add_row(cells);
}

/// Local time with a numeric offset (RFC 822 with numeric zone), e.g.
/// `01 Mar 24 09:00 +0000`.
pub fn format_start(start_millis: i64) -> String {
    DateTime::from_timestamp_millis(start_millis)
        .map(|utc| utc.with_timezone(&Local).format("%d %b %y %H:%M %z").to_string())
        .unwrap_or_else(|| start_millis.to_string())
}

pub fn reservation_count_line(reservations: &[Reservation]) -> String {
    format!("Upcoming reservations: {}", reservations.len())
}

pub fn reservations_table(reservations: &[Reservation]) -> Table {
    let mut table = new_table(&RESERVATION_HEADER);
    for r in reservations {
        add_row(
            &mut table,
            r.id,
            vec![
                format_start(r.start_date),
                r.room.name.clone(),
                r.room.id.to_string(),
                r.room.floor_name().to_string(),
                r.room.building_name().to_string(),
                r.checked_in.to_string(),
            ],
        );
    }
    table
}

pub fn occupancy_table(reservations: &[Reservation]) -> Table {
    let mut table = new_table(&OCCUPANCY_HEADER);
    for r in reservations {
        let reserved_by = r.user.as_ref().map(|u| u.name.clone()).unwrap_or_default();
        add_row(
            &mut table,
            r.id,
            vec![
                format_start(r.start_date),
                r.room.name.clone(),
                reserved_by,
                r.checked_in.to_string(),
            ],
        );
    }
    table
}

pub fn buildings_table(buildings: &[Building]) -> Table {
    let mut table = new_table(&ID_NAME_HEADER);
    for b in buildings {
        add_row(&mut table, b.id, vec![b.name.clone()]);
    }
    table
}

pub fn floors_table(floors: &[Floor]) -> Table {
    let mut table = new_table(&ID_NAME_HEADER);
    for f in floors {
        add_row(&mut table, f.id, vec![f.name.clone()]);
    }
    table
}

/// Two-column key/value view of the effective settings.
pub fn settings_table(entries: &[(&str, String)]) -> Table {
    let mut table = new_table(&["Key", "Value"]);
    for (key, value) in entries {
        add_row(&mut table, key, vec![value.clone()]);
    }
    table
}

pub fn check_in_message(outcome: &Outcome<CheckIn>) -> String {
    match outcome {
        Outcome::Applied(c) => format!("Checked In: {}", c.checked_in),
        Outcome::Rejected(r) => r.description.clone(),
    }
}

pub fn cancellation_message(outcome: &Outcome<Cancellation>) -> String {
    match outcome {
        Outcome::Applied(c) => format!("Booking for {} {}", c.room.name, c.cancellation_reason),
        Outcome::Rejected(r) => r.description.clone(),
    }
}

pub fn booking_message(outcome: &Outcome<Booking>) -> String {
    match outcome {
        Outcome::Applied(b) => format!("Reserved: {} for {}", b.room.name, b.user.name),
        Outcome::Rejected(r) => r.description.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Rejection, Room, User};
    use rstest::rstest;

    fn reservation(id: u64, room: &str) -> Reservation {
        Reservation {
            id,
            start_date: 1_709_251_200_000,
            room: Room {
                id: id * 10,
                name: room.to_string(),
                floor: None,
            },
            checked_in: false,
            user: None,
        }
    }

    fn first_column(table: &Table) -> Vec<String> {
        table
            .row_iter()
            .filter_map(|row| row.cell_iter().next().map(Cell::content))
            .collect()
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(5)]
    fn given_n_reservations_when_rendering_then_n_rows_plus_header(#[case] n: u64) {
        let reservations: Vec<_> = (1..=n).map(|i| reservation(i, "Desk")).collect();

        let table = reservations_table(&reservations);

        assert_eq!(table.row_iter().count() as u64, n);
        let header = table.header().expect("header row");
        assert_eq!(header.cell_count(), RESERVATION_HEADER.len());
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    fn given_long_room_names_and_narrow_width_when_printing_then_one_line_per_row(
        #[case] n: u64,
    ) {
        let reservations: Vec<_> = (1..=n)
            .map(|i| reservation(i, "Large Conference Room Number Seven East Wing"))
            .collect();
        let mut table = reservations_table(&reservations);
        table.set_width(40);

        let printed = table.to_string();

        assert_eq!(printed.lines().count() as u64, n + 1);
    }

    #[test]
    fn given_start_millis_when_formatting_then_date_and_numeric_offset_round_trip() {
        let printed = format_start(1_709_251_200_000);

        let parsed = DateTime::parse_from_str(&printed, "%d %b %y %H:%M %z").unwrap();

        assert_eq!(parsed.timestamp_millis(), 1_709_251_200_000);
        let offset = printed.rsplit(' ').next().unwrap();
        assert!(offset.starts_with('+') || offset.starts_with('-'));
        assert_eq!(offset.len(), 5);
    }

    #[test]
    fn given_reservations_when_rendering_then_input_order_kept() {
        let reservations = vec![reservation(3, "C"), reservation(1, "A"), reservation(2, "B")];

        let table = reservations_table(&reservations);

        assert_eq!(first_column(&table), vec!["3", "1", "2"]);
    }

    #[test]
    fn given_buildings_and_floors_when_rendering_then_one_row_each() {
        let buildings = vec![
            Building {
                id: 1,
                name: "HQ".into(),
            },
            Building {
                id: 2,
                name: "Annex".into(),
            },
        ];
        let floors = vec![Floor {
            id: 7,
            name: "Ground".into(),
            building: None,
        }];

        assert_eq!(first_column(&buildings_table(&buildings)), vec!["1", "2"]);
        assert_eq!(first_column(&floors_table(&floors)), vec!["7"]);
    }

    #[test]
    fn given_occupancy_with_user_when_rendering_then_reserved_by_shown() {
        let mut r = reservation(4, "Desk 4");
        r.user = Some(User {
            id: 1,
            name: "Alice".into(),
        });

        let table = occupancy_table(&[r]);
        let row = table.row_iter().next().unwrap();
        let cells: Vec<String> = row.cell_iter().map(Cell::content).collect();

        assert_eq!(cells[3], "Alice");
    }

    #[test]
    fn given_applied_check_in_when_rendering_then_boolean_line() {
        let msg = check_in_message(&Outcome::Applied(CheckIn { checked_in: true }));
        assert_eq!(msg, "Checked In: true");
    }

    #[test]
    fn given_rejected_check_in_when_rendering_then_only_description() {
        let msg = check_in_message(&Outcome::Rejected(Rejection {
            code: "TOO_EARLY".into(),
            description: "Check-in is not open yet".into(),
        }));
        assert_eq!(msg, "Check-in is not open yet");
        assert!(!msg.contains("Checked In"));
    }

    #[test]
    fn given_applied_cancellation_when_rendering_then_room_and_reason() {
        let msg = cancellation_message(&Outcome::Applied(Cancellation {
            room: Room {
                id: 42,
                name: "Room A".into(),
                floor: None,
            },
            cancellation_reason: "cancelled by user".into(),
        }));
        assert_eq!(msg, "Booking for Room A cancelled by user");
    }

    #[test]
    fn given_applied_booking_when_rendering_then_room_and_user() {
        let msg = booking_message(&Outcome::Applied(Booking {
            room: Room {
                id: 42,
                name: "Room A".into(),
                floor: None,
            },
            user: User {
                id: 2409,
                name: "Alice".into(),
            },
        }));
        assert_eq!(msg, "Reserved: Room A for Alice");
    }

    #[test]
    fn given_out_of_range_millis_when_formatting_then_raw_number() {
        assert_eq!(format_start(i64::MAX), i64::MAX.to_string());
    }
}
