use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One reservable unit of a doctor's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub doctor_id: i64,
    pub date: NaiveDate,
    #[serde(rename = "start_time")]
    pub start: NaiveTime,
    #[serde(rename = "end_time")]
    pub end: NaiveTime,
    pub is_available: bool,
}

impl Slot {
    pub fn key(&self) -> SlotKey {
        SlotKey {
            doctor_id: self.doctor_id,
            date: self.date,
            start: self.start,
        }
    }
}

/// Unique identity of a slot: (doctor, date, start time).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotKey {
    pub doctor_id: i64,
    pub date: NaiveDate,
    pub start: NaiveTime,
}

impl std::fmt::Display for SlotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "doctor={} date={} time={}", self.doctor_id, self.date, self.start)
    }
}
