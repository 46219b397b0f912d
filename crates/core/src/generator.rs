//! Schedule generation.
//!
//! Turns a working interval of one day into back-to-back slots of a fixed
//! length. Generation is pure; persisting the result is the slot store's job.

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::errors::{BookingError, BookingResult};
use crate::models::{schedule::ScheduleSpec, slot::Slot};

/// Splits `[start_time, end_time)` into slots of `slot_duration_minutes`.
///
/// The first slot starts at `start_time`. A trailing remainder shorter than
/// one slot is dropped, and no slot crosses midnight.
///
/// # Errors
///
/// * `BookingError::InvalidRange` - `start_time` is not before `end_time`
/// * `BookingError::InvalidDuration` - the duration is zero or negative
pub fn generate(
    doctor_id: i64,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    slot_duration_minutes: i64,
) -> BookingResult<Vec<Slot>> {
    if start_time >= end_time {
        return Err(BookingError::InvalidRange(format!(
            "start time {start_time} must be before end time {end_time}"
        )));
    }
    if slot_duration_minutes <= 0 {
        return Err(BookingError::InvalidDuration(slot_duration_minutes));
    }

    // Anything longer than the interval yields no slots; this also keeps the
    // Duration constructor in range.
    let Some(step) = Duration::try_minutes(slot_duration_minutes)
        .filter(|step| *step <= end_time - start_time)
    else {
        return Ok(Vec::new());
    };

    let mut slots = Vec::new();
    let mut current = start_time;
    while current < end_time {
        let (next, wrapped) = current.overflowing_add_signed(step);
        if wrapped != 0 || next > end_time {
            break;
        }
        slots.push(Slot {
            doctor_id,
            date,
            start: current,
            end: next,
            is_available: true,
        });
        current = next;
    }

    Ok(slots)
}

impl ScheduleSpec {
    pub fn generate(&self) -> BookingResult<Vec<Slot>> {
        generate(
            self.doctor_id,
            self.date,
            self.start_time,
            self.end_time,
            self.slot_duration_minutes,
        )
    }
}
