//! Booking date parsing and epoch conversion

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::domain::DomainError;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parse a user-supplied booking date.
///
/// Bare dates resolve to midnight UTC. Date-times without an offset are
/// read as UTC; RFC 3339 input keeps its own offset.
pub fn parse_booking_date(input: &str) -> Result<DateTime<Utc>, DomainError> {
    let trimmed = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(naive.and_utc());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Ok(date.and_time(NaiveTime::MIN).and_utc());
        }
    }

    Err(DomainError::InvalidDate {
        input: input.to_string(),
    })
}

/// Whole Unix seconds times 1000; sub-second precision is dropped.
pub fn epoch_millis(at: DateTime<Utc>) -> i64 {
    at.timestamp() * 1000
}

/// `[start, end)` of a UTC calendar day in epoch milliseconds.
pub fn day_bounds_millis(day: NaiveDate) -> (i64, i64) {
    let start = day.and_time(NaiveTime::MIN).and_utc();
    let end = start + chrono::Duration::days(1);
    (epoch_millis(start), epoch_millis(end))
}
