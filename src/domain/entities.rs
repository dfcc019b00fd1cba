//! Domain entities: records exchanged with the booking service
//!
//! Field names follow the service's JSON schema (camelCase) exactly.

use serde::{Deserialize, Serialize};

/// Seat count sent with every reservation request.
pub const PEOPLE_PER_BOOKING: u32 = 1;

/// How requests authenticate against the service.
///
/// A session token takes precedence over username/password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Opaque session token, sent as the `ACTID` cookie
    Session { token: String },
    /// Sent as `x-auth-username` / `x-auth-password` headers
    Password { username: String, password: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Floor {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub building: Option<Building>,
}

/// A bookable room or desk. Floor and building are nested read-only records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub floor: Option<Floor>,
}

impl Room {
    pub fn floor_name(&self) -> &str {
        self.floor.as_ref().map_or("", |f| f.name.as_str())
    }

    pub fn building_name(&self) -> &str {
        self.floor
            .as_ref()
            .and_then(|f| f.building.as_ref())
            .map_or("", |b| b.name.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: u64,
    /// Milliseconds since the Unix epoch, UTC
    pub start_date: i64,
    #[serde(default)]
    pub room: Room,
    #[serde(default)]
    pub checked_in: bool,
    /// Present on floor-wide queries; omitted for "my reservations"
    #[serde(default)]
    pub user: Option<User>,
}

/// Payload of a successful check-in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    #[serde(default)]
    pub checked_in: bool,
}

/// Payload of a successful cancellation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cancellation {
    #[serde(default)]
    pub room: Room,
    #[serde(default)]
    pub cancellation_reason: String,
}

/// Payload of a successfully created reservation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(default)]
    pub room: Room,
    #[serde(default)]
    pub user: User,
}

/// `{"id": n}` reference used in request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntityRef {
    pub id: u64,
}

/// Body of `POST v2/reservations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub guests: Vec<EntityRef>,
    pub notes: String,
    pub user: EntityRef,
    pub center: EntityRef,
    pub room: EntityRef,
    pub number_of_people: u32,
    pub start_date: i64,
    pub end_date: i64,
    pub all_day: bool,
}

impl ReservationRequest {
    /// All-day booking: start and end are the same instant, the service
    /// derives the actual window from `allDay`.
    pub fn all_day(user_id: u64, center_id: u64, room_id: u64, start_millis: i64) -> Self {
        Self {
            guests: Vec::new(),
            notes: String::new(),
            user: EntityRef { id: user_id },
            center: EntityRef { id: center_id },
            room: EntityRef { id: room_id },
            number_of_people: PEOPLE_PER_BOOKING,
            start_date: start_millis,
            end_date: start_millis,
            all_day: true,
        }
    }
}

/// Error envelope reported by the service alongside HTTP success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub code: String,
    pub description: String,
}

/// Result of an operation that may be refused server-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Applied(T),
    Rejected(Rejection),
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }
}
