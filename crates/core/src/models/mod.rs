pub mod appointment;
pub mod doctor;
pub mod schedule;
pub mod slot;

use chrono::{NaiveDate, NaiveTime};

use crate::errors::{BookingError, BookingResult};

/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Wire format for slot and appointment times.
pub const TIME_FORMAT: &str = "%H:%M:%S";

pub fn parse_date(field: &str, value: &str) -> BookingResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        BookingError::InvalidInput(format!(
            "{field} must use the YYYY-MM-DD format, got {value:?}"
        ))
    })
}

pub fn parse_time(field: &str, value: &str) -> BookingResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).map_err(|_| {
        BookingError::InvalidInput(format!(
            "{field} must use the HH:MM:SS format, got {value:?}"
        ))
    })
}

pub(crate) fn require_id(field: &str, value: i64) -> BookingResult<i64> {
    if value <= 0 {
        return Err(BookingError::InvalidInput(format!("{field} is missing")));
    }
    Ok(value)
}

pub(crate) fn require_text(field: &str, value: &str) -> BookingResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(BookingError::InvalidInput(format!("{field} is missing")));
    }
    Ok(value.to_string())
}

/// Blank optional text is stored as absent.
pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
