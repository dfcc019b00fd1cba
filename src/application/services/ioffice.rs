//! Booking service mapper
//!
//! One method per CLI intent. Each builds a path (and body), performs a single
//! transport call and decodes the answer into domain records.

use std::cell::OnceCell;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, instrument};
use url::form_urlencoded;

use crate::application::envelope::{decode, decode_outcome};
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    day_bounds_millis, Booking, Building, Cancellation, CheckIn, DomainError, Floor, Outcome,
    Reservation, ReservationRequest, Room, User,
};
use crate::infrastructure::traits::{HttpMethod, Transport};

pub const MY_RESERVATIONS_PATH: &str = "v2/reservations/?showOnlyMyReservations=true";
pub const RESERVATIONS_PATH: &str = "v2/reservations";
pub const CURRENT_USER_PATH: &str = "v2/users/me";
pub const BUILDINGS_PATH: &str = "v2/buildings";
pub const FLOORS_PATH: &str = "v2/floors";

pub fn check_in_path(reservation_id: u64) -> String {
    format!("v2/reservations/{reservation_id}/checkIn")
}

pub fn cancel_path(reservation_id: u64) -> String {
    format!("v2/reservations/{reservation_id}/cancel")
}

/// `v2/rooms/?room=<search>[&buildingId=<b>]`, query values form-encoded.
pub fn room_search_path(search: &str, building_id: Option<u64>) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("room", search);
    if let Some(building) = building_id {
        query.append_pair("buildingId", &building.to_string());
    }
    format!("v2/rooms/?{}", query.finish())
}

pub fn floors_path(building_id: Option<u64>) -> String {
    match building_id {
        Some(building) => format!("{FLOORS_PATH}/?buildingId={building}"),
        None => FLOORS_PATH.to_string(),
    }
}

pub fn occupancy_path(floor_id: u64, day: NaiveDate) -> String {
    let (start, end) = day_bounds_millis(day);
    format!("v2/reservations/?floorId={floor_id}&startDate={start}&endDate={end}")
}

/// Maps booking intents onto the REST API.
///
/// The current user is fetched at most once per instance.
pub struct IOfficeService {
    transport: Arc<dyn Transport>,
    current_user: OnceCell<User>,
}

impl IOfficeService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            current_user: OnceCell::new(),
        }
    }

    fn get<T: serde::de::DeserializeOwned>(&self, context: &str, path: &str) -> ApplicationResult<T> {
        let body = self.transport.request(HttpMethod::Get, path, None)?;
        decode(context, &body)
    }

    /// The authenticated user. Any failure here is reported as an auth failure:
    /// an SSO login page answers with HTTP 200 and HTML instead of JSON.
    #[instrument(skip(self))]
    pub fn current_user(&self) -> ApplicationResult<User> {
        if let Some(user) = self.current_user.get() {
            return Ok(user.clone());
        }
        let body = self
            .transport
            .request(HttpMethod::Get, CURRENT_USER_PATH, None)
            .map_err(|e| ApplicationError::AuthFailed {
                source: Box::new(e),
            })?;
        let user: User =
            serde_json::from_slice(&body).map_err(|e| ApplicationError::AuthFailed {
                source: Box::new(e),
            })?;
        debug!("authenticated as {} ({})", user.name, user.id);
        Ok(self.current_user.get_or_init(|| user).clone())
    }

    /// Upcoming reservations of the current user, in service order.
    #[instrument(skip(self))]
    pub fn reservations(&self) -> ApplicationResult<Vec<Reservation>> {
        let reservations: Vec<Reservation> = self.get("reservations", MY_RESERVATIONS_PATH)?;
        debug!("decoded {} reservations", reservations.len());
        Ok(reservations)
    }

    #[instrument(skip(self))]
    pub fn check_in(&self, reservation_id: u64) -> ApplicationResult<Outcome<CheckIn>> {
        let body = self
            .transport
            .request(HttpMethod::Put, &check_in_path(reservation_id), None)?;
        decode_outcome("check-in", &body)
    }

    #[instrument(skip(self))]
    pub fn cancel(&self, reservation_id: u64) -> ApplicationResult<Outcome<Cancellation>> {
        let body = self
            .transport
            .request(HttpMethod::Put, &cancel_path(reservation_id), None)?;
        decode_outcome("cancellation", &body)
    }

    #[instrument(skip(self))]
    pub fn create_reservation(
        &self,
        request: &ReservationRequest,
    ) -> ApplicationResult<Outcome<Booking>> {
        let payload = serde_json::to_vec(request).map_err(|source| ApplicationError::Encode {
            context: "reservation request".to_string(),
            source,
        })?;
        let body = self
            .transport
            .request(HttpMethod::Post, RESERVATIONS_PATH, Some(&payload))?;
        decode_outcome("reservation", &body)
    }

    /// First room matching `search`; no match is an error.
    #[instrument(skip(self))]
    pub fn find_room(&self, search: &str, building_id: Option<u64>) -> ApplicationResult<Room> {
        let rooms: Vec<Room> = self.get("rooms", &room_search_path(search, building_id))?;
        debug!("room search {:?} returned {} rooms", search, rooms.len());
        rooms.into_iter().next().ok_or_else(|| {
            DomainError::RoomNotFound {
                search: search.to_string(),
            }
            .into()
        })
    }

    #[instrument(skip(self))]
    pub fn buildings(&self) -> ApplicationResult<Vec<Building>> {
        self.get("buildings", BUILDINGS_PATH)
    }

    #[instrument(skip(self))]
    pub fn floors(&self, building_id: Option<u64>) -> ApplicationResult<Vec<Floor>> {
        self.get("floors", &floors_path(building_id))
    }

    /// Reservations on a floor for one UTC day.
    #[instrument(skip(self))]
    pub fn occupancy(&self, floor_id: u64, day: NaiveDate) -> ApplicationResult<Vec<Reservation>> {
        self.get("occupancy", &occupancy_path(floor_id, day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_search_with_space_when_building_path_then_query_is_encoded() {
        assert_eq!(room_search_path("Room A", None), "v2/rooms/?room=Room+A");
    }

    #[test]
    fn given_building_filter_when_building_path_then_building_id_appended() {
        assert_eq!(
            room_search_path("Desk 12", Some(5)),
            "v2/rooms/?room=Desk+12&buildingId=5"
        );
    }

    #[test]
    fn given_reservation_id_when_building_paths_then_match_api() {
        assert_eq!(check_in_path(99), "v2/reservations/99/checkIn");
        assert_eq!(cancel_path(99), "v2/reservations/99/cancel");
    }

    #[test]
    fn given_optional_building_when_building_floors_path_then_filter_only_when_set() {
        assert_eq!(floors_path(None), "v2/floors");
        assert_eq!(floors_path(Some(3)), "v2/floors/?buildingId=3");
    }

    #[test]
    fn given_day_when_building_occupancy_path_then_bounds_cover_day() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(
            occupancy_path(8, day),
            "v2/reservations/?floorId=8&startDate=1709251200000&endDate=1709337600000"
        );
    }
}
