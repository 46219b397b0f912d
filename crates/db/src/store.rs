//! Postgres implementation of the core storage traits.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use clinicbook_core::{
    errors::{BookingError, BookingResult},
    models::{
        appointment::{Appointment, NewAppointment},
        doctor::{Doctor, NewDoctor, NewSpecialization, Specialization},
        slot::{Slot, SlotKey},
    },
    store::{
        AppointmentScope, AppointmentStore, BookingOutcome, CancelOutcome, DoctorStore, SlotStore,
    },
};
use uuid::Uuid;

use crate::repositories::{appointment, doctor, slot};
use crate::DbPool;

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl SlotStore for PgStore {
    async fn persist_slots(&self, doctor_id: i64, slots: &[Slot]) -> BookingResult<()> {
        slot::insert_slots(&self.pool, doctor_id, slots).await?;
        Ok(())
    }

    async fn list_slots_from(&self, doctor_id: i64, from: NaiveDate) -> BookingResult<Vec<Slot>> {
        let rows = slot::get_slots_from(&self.pool, doctor_id, from).await?;
        Ok(rows.into_iter().map(Slot::from).collect())
    }

    async fn find_slot(&self, key: SlotKey) -> BookingResult<Option<Slot>> {
        Ok(slot::get_slot(&self.pool, key).await?.map(Slot::from))
    }
}

#[async_trait]
impl AppointmentStore for PgStore {
    async fn book_slot(&self, id: Uuid, booking: NewAppointment) -> BookingResult<BookingOutcome> {
        Ok(appointment::book_slot(&self.pool, id, &booking).await?)
    }

    async fn cancel_appointment(&self, id: Uuid) -> BookingResult<CancelOutcome> {
        Ok(appointment::cancel_appointment(&self.pool, id).await?)
    }

    async fn get_appointment(&self, id: Uuid) -> BookingResult<Option<Appointment>> {
        appointment::get_appointment(&self.pool, id)
            .await?
            .map(Appointment::try_from)
            .transpose()
    }

    async fn set_rating(&self, id: Uuid, rating: f64) -> BookingResult<bool> {
        Ok(appointment::set_rating(&self.pool, id, rating).await?)
    }

    async fn complete_overdue(
        &self,
        scope: AppointmentScope,
        now: NaiveDateTime,
    ) -> BookingResult<u64> {
        Ok(appointment::complete_overdue(&self.pool, scope, now).await?)
    }

    async fn list_appointments(&self, scope: AppointmentScope) -> BookingResult<Vec<Appointment>> {
        appointment::list_appointments(&self.pool, scope)
            .await?
            .into_iter()
            .map(Appointment::try_from)
            .collect()
    }
}

#[async_trait]
impl DoctorStore for PgStore {
    async fn get_doctor(&self, id: i64) -> BookingResult<Option<Doctor>> {
        Ok(doctor::get_doctor(&self.pool, id).await?.map(Doctor::from))
    }

    async fn get_specialization(&self, id: i64) -> BookingResult<Option<Specialization>> {
        Ok(doctor::get_specialization(&self.pool, id)
            .await?
            .map(Specialization::from))
    }

    async fn list_doctors_for_specialization(
        &self,
        specialization_id: i64,
    ) -> BookingResult<Vec<Doctor>> {
        let rows = doctor::get_doctors_by_specialization(&self.pool, specialization_id).await?;
        Ok(rows.into_iter().map(Doctor::from).collect())
    }

    async fn doctor_ids_for_specialization(&self, specialization_id: i64) -> BookingResult<Vec<i64>> {
        Ok(doctor::get_doctor_ids_by_specialization(&self.pool, specialization_id).await?)
    }

    async fn average_rating(&self, doctor_id: i64) -> BookingResult<Option<f64>> {
        Ok(doctor::average_rating(&self.pool, doctor_id).await?)
    }

    async fn set_doctor_rating(&self, doctor_id: i64, rating: f64) -> BookingResult<()> {
        if !doctor::set_doctor_rating(&self.pool, doctor_id, rating).await? {
            return Err(BookingError::NotFound(format!(
                "Doctor with ID {doctor_id} not found"
            )));
        }
        Ok(())
    }

    async fn list_specializations(&self) -> BookingResult<Vec<Specialization>> {
        let rows = doctor::list_specializations(&self.pool).await?;
        Ok(rows.into_iter().map(Specialization::from).collect())
    }

    async fn create_specialization(
        &self,
        specialization: NewSpecialization,
    ) -> BookingResult<Specialization> {
        Ok(doctor::create_specialization(&self.pool, &specialization)
            .await?
            .into())
    }

    async fn delete_specialization(&self, id: i64) -> BookingResult<bool> {
        Ok(doctor::delete_specialization(&self.pool, id).await?)
    }

    async fn create_doctor(&self, new_doctor: NewDoctor) -> BookingResult<Option<Doctor>> {
        Ok(doctor::create_doctor(&self.pool, &new_doctor)
            .await?
            .map(Doctor::from))
    }

    async fn delete_doctor(&self, id: i64) -> BookingResult<bool> {
        Ok(doctor::delete_doctor(&self.pool, id).await?)
    }
}
