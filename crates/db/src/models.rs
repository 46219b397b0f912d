use chrono::{NaiveDate, NaiveTime};
use clinicbook_core::{
    errors::BookingError,
    models::{
        appointment::{Appointment, AppointmentStatus},
        doctor::{Doctor, Specialization},
        slot::Slot,
    },
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSlot {
    pub doctor_id: i64,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
}

impl From<DbSlot> for Slot {
    fn from(row: DbSlot) -> Self {
        Slot {
            doctor_id: row.doctor_id,
            date: row.date,
            start: row.start_time,
            end: row.end_time,
            is_available: row.is_available,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub doctor_id: i64,
    pub patient_id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status_id: i16,
    pub rating: Option<f64>,
}

impl TryFrom<DbAppointment> for Appointment {
    type Error = BookingError;

    fn try_from(row: DbAppointment) -> Result<Self, Self::Error> {
        Ok(Appointment {
            id: row.id,
            doctor_id: row.doctor_id,
            patient_id: row.patient_id,
            date: row.date,
            time: row.time,
            status: AppointmentStatus::try_from(row.status_id)?,
            rating: row.rating,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbDoctor {
    pub id: i64,
    pub surname: String,
    pub name: String,
    pub patronymic: Option<String>,
    pub specialization_id: i64,
    pub education: Option<String>,
    pub progress: Option<String>,
    pub rating: Option<f64>,
    pub photo_path: Option<String>,
}

impl From<DbDoctor> for Doctor {
    fn from(row: DbDoctor) -> Self {
        Doctor {
            id: row.id,
            surname: row.surname,
            name: row.name,
            patronymic: row.patronymic,
            specialization_id: row.specialization_id,
            education: row.education,
            progress: row.progress,
            rating: row.rating,
            photo_path: row.photo_path,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSpecialization {
    pub id: i64,
    pub specialization: String,
    pub specialization_doctor: String,
    pub description: Option<String>,
}

impl From<DbSpecialization> for Specialization {
    fn from(row: DbSpecialization) -> Self {
        Specialization {
            id: row.id,
            specialization: row.specialization,
            specialization_doctor: row.specialization_doctor,
            description: row.description,
        }
    }
}
