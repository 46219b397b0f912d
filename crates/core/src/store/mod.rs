//! Storage seams of the booking core.
//!
//! Services receive these traits as `Arc<dyn ...>` so they run unchanged
//! against Postgres or the in-memory store.

pub mod memory;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::errors::BookingResult;
use crate::models::{
    appointment::{Appointment, NewAppointment},
    doctor::{Doctor, NewDoctor, NewSpecialization, Specialization},
    slot::{Slot, SlotKey},
};

/// Result of the atomic reserve-and-insert step.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingOutcome {
    /// The slot was free; it is now held by the returned appointment.
    Booked(Appointment),
    /// The slot exists but another appointment holds it.
    SlotBusy,
    /// No slot with this key exists.
    SlotMissing,
}

/// Result of the atomic cancel-and-release step.
#[derive(Debug, Clone, PartialEq)]
pub enum CancelOutcome {
    Canceled(Appointment),
    /// Completed or already canceled; nothing was changed.
    AlreadyTerminal(Appointment),
    Missing,
}

/// Whose appointments a lifecycle pass or listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentScope {
    Patient(i64),
    Doctor(i64),
}

impl std::fmt::Display for AppointmentScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppointmentScope::Patient(id) => write!(f, "patient {id}"),
            AppointmentScope::Doctor(id) => write!(f, "doctor {id}"),
        }
    }
}

#[async_trait]
pub trait SlotStore: Send + Sync {
    /// Inserts all slots in one transaction; any failure leaves nothing behind.
    async fn persist_slots(&self, doctor_id: i64, slots: &[Slot]) -> BookingResult<()>;

    /// Slots dated `from` or later, ordered by date then start time.
    async fn list_slots_from(&self, doctor_id: i64, from: NaiveDate) -> BookingResult<Vec<Slot>>;

    async fn find_slot(&self, key: SlotKey) -> BookingResult<Option<Slot>>;
}

#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Marks the slot unavailable only if it is currently available and
    /// inserts a Scheduled appointment, as one atomic unit.
    async fn book_slot(&self, id: Uuid, booking: NewAppointment) -> BookingResult<BookingOutcome>;

    /// Cancels a Scheduled appointment and frees its slot, as one atomic unit.
    async fn cancel_appointment(&self, id: Uuid) -> BookingResult<CancelOutcome>;

    async fn get_appointment(&self, id: Uuid) -> BookingResult<Option<Appointment>>;

    /// Returns `false` when no appointment has this id.
    async fn set_rating(&self, id: Uuid, rating: f64) -> BookingResult<bool>;

    /// Moves Scheduled appointments starting before `now` to Completed and
    /// returns how many changed.
    async fn complete_overdue(
        &self,
        scope: AppointmentScope,
        now: NaiveDateTime,
    ) -> BookingResult<u64>;

    /// Appointments in `scope`, ordered by date then time.
    async fn list_appointments(&self, scope: AppointmentScope) -> BookingResult<Vec<Appointment>>;
}

#[async_trait]
pub trait DoctorStore: Send + Sync {
    async fn get_doctor(&self, id: i64) -> BookingResult<Option<Doctor>>;

    async fn get_specialization(&self, id: i64) -> BookingResult<Option<Specialization>>;

    async fn list_doctors_for_specialization(
        &self,
        specialization_id: i64,
    ) -> BookingResult<Vec<Doctor>>;

    async fn doctor_ids_for_specialization(&self, specialization_id: i64) -> BookingResult<Vec<i64>>;

    /// Mean of every non-null appointment rating for the doctor.
    async fn average_rating(&self, doctor_id: i64) -> BookingResult<Option<f64>>;

    async fn set_doctor_rating(&self, doctor_id: i64, rating: f64) -> BookingResult<()>;

    /// All specializations, ordered by id.
    async fn list_specializations(&self) -> BookingResult<Vec<Specialization>>;

    async fn create_specialization(
        &self,
        specialization: NewSpecialization,
    ) -> BookingResult<Specialization>;

    /// Removes the specialization together with its doctors, their slots and
    /// their appointments. Returns `false` when no specialization has the id.
    async fn delete_specialization(&self, id: i64) -> BookingResult<bool>;

    /// Returns `None` when the referenced specialization does not exist.
    async fn create_doctor(&self, doctor: NewDoctor) -> BookingResult<Option<Doctor>>;

    /// Removes the doctor together with their slots and appointments.
    /// Returns `false` when no doctor has the id.
    async fn delete_doctor(&self, id: i64) -> BookingResult<bool>;
}
