use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    doctor::{Doctor, Specialization},
    parse_date, parse_time, require_id,
    slot::SlotKey,
};
use crate::errors::{BookingError, BookingResult};

/// Rating shown for appointments the patient has not rated yet.
pub const DEFAULT_DISPLAY_RATING: f64 = 5.0;
pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Canceled,
}

impl AppointmentStatus {
    /// Identifier stored in `appointments.status_id`.
    pub fn id(self) -> i16 {
        match self {
            AppointmentStatus::Scheduled => 1,
            AppointmentStatus::Completed => 2,
            AppointmentStatus::Canceled => 3,
        }
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            1 => Some(AppointmentStatus::Scheduled),
            2 => Some(AppointmentStatus::Completed),
            3 => Some(AppointmentStatus::Canceled),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "SCHEDULED",
            AppointmentStatus::Completed => "COMPLETED",
            AppointmentStatus::Canceled => "CANCELED",
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, AppointmentStatus::Scheduled)
    }

    /// Status only moves forward: Scheduled -> Completed | Canceled.
    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        matches!(
            (self, next),
            (AppointmentStatus::Scheduled, AppointmentStatus::Completed)
                | (AppointmentStatus::Scheduled, AppointmentStatus::Canceled)
        )
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<i16> for AppointmentStatus {
    type Error = BookingError;

    fn try_from(id: i16) -> Result<Self, Self::Error> {
        AppointmentStatus::from_id(id).ok_or_else(|| {
            BookingError::Database(eyre::eyre!("unknown appointment status id {id}"))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub doctor_id: i64,
    pub patient_id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: AppointmentStatus,
    pub rating: Option<f64>,
}

impl Appointment {
    /// The slot this appointment was booked against.
    pub fn slot_key(&self) -> SlotKey {
        SlotKey {
            doctor_id: self.doctor_id,
            date: self.date,
            start: self.time,
        }
    }

    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// A scheduled appointment whose start lies strictly before `now`.
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        self.status == AppointmentStatus::Scheduled && self.starts_at() < now
    }

    pub fn display_rating(&self) -> f64 {
        self.rating.unwrap_or(DEFAULT_DISPLAY_RATING)
    }
}

/// A booking request that has passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewAppointment {
    pub doctor_id: i64,
    pub patient_id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl NewAppointment {
    pub fn slot_key(&self) -> SlotKey {
        SlotKey {
            doctor_id: self.doctor_id,
            date: self.date,
            start: self.time,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub doctor_id: i64,
    pub patient_id: i64,
    /// YYYY-MM-DD
    pub date: String,
    /// HH:MM:SS, must equal the start of a generated slot
    pub time: String,
}

impl CreateAppointmentRequest {
    pub fn validate(&self) -> BookingResult<NewAppointment> {
        Ok(NewAppointment {
            doctor_id: require_id("doctor_id", self.doctor_id)?,
            patient_id: require_id("patient_id", self.patient_id)?,
            date: parse_date("date", &self.date)?,
            time: parse_time("time", &self.time)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateAppointmentRequest {
    pub rating: f64,
}

impl RateAppointmentRequest {
    pub fn validate(&self) -> BookingResult<f64> {
        validate_rating(self.rating)
    }
}

pub fn validate_rating(rating: f64) -> BookingResult<f64> {
    if !rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(BookingError::InvalidRating(rating));
    }
    Ok(rating)
}

/// Appointment as presented to callers, with the display default for
/// unrated appointments filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentResponse {
    pub id: Uuid,
    pub doctor_id: i64,
    pub patient_id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: AppointmentStatus,
    pub rating: f64,
}

impl From<Appointment> for AppointmentResponse {
    fn from(appointment: Appointment) -> Self {
        let rating = appointment.display_rating();
        Self {
            id: appointment.id,
            doctor_id: appointment.doctor_id,
            patient_id: appointment.patient_id,
            date: appointment.date,
            time: appointment.time,
            status: appointment.status,
            rating,
        }
    }
}

/// An entry of a patient's appointment list, naming who the visit is with.
/// The doctor fields are empty when the doctor record is gone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientAppointmentResponse {
    #[serde(flatten)]
    pub appointment: AppointmentResponse,
    pub doctor_full_name: Option<String>,
    pub specialization_doctor: Option<String>,
}

impl PatientAppointmentResponse {
    pub fn new(
        appointment: Appointment,
        doctor: Option<&Doctor>,
        specialization: Option<&Specialization>,
    ) -> Self {
        Self {
            appointment: appointment.into(),
            doctor_full_name: doctor.map(Doctor::full_name),
            specialization_doctor: specialization.map(|s| s.specialization_doctor.clone()),
        }
    }
}
