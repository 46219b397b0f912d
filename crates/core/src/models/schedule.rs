use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{doctor::Doctor, parse_date, parse_time, slot::Slot};
use crate::errors::BookingResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateScheduleRequest {
    /// YYYY-MM-DD
    pub date: String,
    /// HH:MM:SS
    pub start_time: String,
    /// HH:MM:SS
    pub end_time: String,
    pub slot_duration_minutes: i64,
}

impl GenerateScheduleRequest {
    /// Parses the wire fields. Range and duration rules are enforced by the
    /// generator itself.
    pub fn validate(&self, doctor_id: i64) -> BookingResult<ScheduleSpec> {
        Ok(ScheduleSpec {
            doctor_id: super::require_id("doctor_id", doctor_id)?,
            date: parse_date("date", &self.date)?,
            start_time: parse_time("start_time", &self.start_time)?,
            end_time: parse_time("end_time", &self.end_time)?,
            slot_duration_minutes: self.slot_duration_minutes,
        })
    }
}

/// Typed input of the schedule generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleSpec {
    pub doctor_id: i64,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub slot_duration_minutes: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleQuery {
    /// First date to include, YYYY-MM-DD. Defaults to today.
    pub date: Option<String>,
}

impl ScheduleQuery {
    pub fn from_date(&self, today: NaiveDate) -> BookingResult<NaiveDate> {
        match &self.date {
            Some(date) => parse_date("date", date),
            None => Ok(today),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateScheduleResponse {
    pub slots: Vec<Slot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub doctor: Doctor,
    pub slots: Vec<Slot>,
}
