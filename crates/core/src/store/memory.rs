//! In-process implementation of the store traits.
//!
//! Every operation runs under a single lock, which gives the same atomicity
//! the Postgres transactions provide. Used by tests and local experiments.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use eyre::eyre;
use uuid::Uuid;

use super::{AppointmentScope, AppointmentStore, BookingOutcome, CancelOutcome, DoctorStore, SlotStore};
use crate::errors::{BookingError, BookingResult};
use crate::models::{
    appointment::{Appointment, AppointmentStatus, NewAppointment},
    doctor::{Doctor, NewDoctor, NewSpecialization, Specialization},
    slot::{Slot, SlotKey},
};

#[derive(Debug, Default)]
struct MemoryState {
    slots: BTreeMap<SlotKey, Slot>,
    appointments: HashMap<Uuid, Appointment>,
    doctors: BTreeMap<i64, Doctor>,
    specializations: BTreeMap<i64, Specialization>,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<MemoryState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> BookingResult<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| BookingError::Database(eyre!("in-memory store lock poisoned")))
    }

    pub fn insert_doctor(&self, doctor: Doctor) -> BookingResult<()> {
        self.state()?.doctors.insert(doctor.id, doctor);
        Ok(())
    }

    pub fn insert_specialization(&self, specialization: Specialization) -> BookingResult<()> {
        self.state()?
            .specializations
            .insert(specialization.id, specialization);
        Ok(())
    }

    /// Stores an appointment as-is, bypassing slot bookkeeping. Useful for
    /// seeding history such as past or already rated visits.
    pub fn insert_appointment(&self, appointment: Appointment) -> BookingResult<()> {
        self.state()?.appointments.insert(appointment.id, appointment);
        Ok(())
    }

    pub fn all_appointments(&self) -> BookingResult<Vec<Appointment>> {
        let mut appointments: Vec<_> = self.state()?.appointments.values().cloned().collect();
        appointments.sort_by_key(|a| (a.date, a.time, a.id));
        Ok(appointments)
    }
}

impl MemoryState {
    fn remove_doctor(&mut self, id: i64) -> bool {
        if self.doctors.remove(&id).is_none() {
            return false;
        }
        self.slots.retain(|key, _| key.doctor_id != id);
        self.appointments.retain(|_, a| a.doctor_id != id);
        true
    }
}

fn next_id<V>(map: &BTreeMap<i64, V>) -> i64 {
    map.keys().next_back().map_or(1, |last| last + 1)
}

fn in_scope(appointment: &Appointment, scope: AppointmentScope) -> bool {
    match scope {
        AppointmentScope::Patient(id) => appointment.patient_id == id,
        AppointmentScope::Doctor(id) => appointment.doctor_id == id,
    }
}

#[async_trait]
impl SlotStore for InMemoryStore {
    async fn persist_slots(&self, doctor_id: i64, slots: &[Slot]) -> BookingResult<()> {
        let mut state = self.state()?;
        if !state.doctors.contains_key(&doctor_id) {
            return Err(BookingError::Database(eyre!(
                "slots reference unknown doctor {doctor_id}"
            )));
        }

        // Validate the whole batch first so a failure inserts nothing.
        let mut batch = BTreeMap::new();
        for slot in slots {
            let key = slot.key();
            if slot.doctor_id != doctor_id {
                return Err(BookingError::Database(eyre!(
                    "slot {key} does not belong to doctor {doctor_id}"
                )));
            }
            if state.slots.contains_key(&key) || batch.insert(key, slot.clone()).is_some() {
                return Err(BookingError::Database(eyre!("duplicate slot {key}")));
            }
        }

        state.slots.extend(batch);
        Ok(())
    }

    async fn list_slots_from(&self, doctor_id: i64, from: NaiveDate) -> BookingResult<Vec<Slot>> {
        let state = self.state()?;
        Ok(state
            .slots
            .values()
            .filter(|slot| slot.doctor_id == doctor_id && slot.date >= from)
            .cloned()
            .collect())
    }

    async fn find_slot(&self, key: SlotKey) -> BookingResult<Option<Slot>> {
        Ok(self.state()?.slots.get(&key).cloned())
    }
}

#[async_trait]
impl AppointmentStore for InMemoryStore {
    async fn book_slot(&self, id: Uuid, booking: NewAppointment) -> BookingResult<BookingOutcome> {
        let mut state = self.state()?;

        let Some(slot) = state.slots.get_mut(&booking.slot_key()) else {
            return Ok(BookingOutcome::SlotMissing);
        };
        if !slot.is_available {
            return Ok(BookingOutcome::SlotBusy);
        }
        slot.is_available = false;

        let appointment = Appointment {
            id,
            doctor_id: booking.doctor_id,
            patient_id: booking.patient_id,
            date: booking.date,
            time: booking.time,
            status: AppointmentStatus::Scheduled,
            rating: None,
        };
        state.appointments.insert(id, appointment.clone());

        Ok(BookingOutcome::Booked(appointment))
    }

    async fn cancel_appointment(&self, id: Uuid) -> BookingResult<CancelOutcome> {
        let mut state = self.state()?;

        let Some(appointment) = state.appointments.get_mut(&id) else {
            return Ok(CancelOutcome::Missing);
        };
        if !appointment.status.can_transition_to(AppointmentStatus::Canceled) {
            return Ok(CancelOutcome::AlreadyTerminal(appointment.clone()));
        }
        appointment.status = AppointmentStatus::Canceled;
        let canceled = appointment.clone();

        if let Some(slot) = state.slots.get_mut(&canceled.slot_key()) {
            slot.is_available = true;
        }

        Ok(CancelOutcome::Canceled(canceled))
    }

    async fn get_appointment(&self, id: Uuid) -> BookingResult<Option<Appointment>> {
        Ok(self.state()?.appointments.get(&id).cloned())
    }

    async fn set_rating(&self, id: Uuid, rating: f64) -> BookingResult<bool> {
        let mut state = self.state()?;
        match state.appointments.get_mut(&id) {
            Some(appointment) => {
                appointment.rating = Some(rating);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn complete_overdue(
        &self,
        scope: AppointmentScope,
        now: NaiveDateTime,
    ) -> BookingResult<u64> {
        let mut state = self.state()?;
        let mut promoted = 0;
        for appointment in state.appointments.values_mut() {
            if in_scope(appointment, scope) && appointment.is_overdue(now) {
                appointment.status = AppointmentStatus::Completed;
                promoted += 1;
            }
        }
        Ok(promoted)
    }

    async fn list_appointments(&self, scope: AppointmentScope) -> BookingResult<Vec<Appointment>> {
        let state = self.state()?;
        let mut appointments: Vec<_> = state
            .appointments
            .values()
            .filter(|a| in_scope(a, scope))
            .cloned()
            .collect();
        appointments.sort_by_key(|a| (a.date, a.time, a.id));
        Ok(appointments)
    }
}

#[async_trait]
impl DoctorStore for InMemoryStore {
    async fn get_doctor(&self, id: i64) -> BookingResult<Option<Doctor>> {
        Ok(self.state()?.doctors.get(&id).cloned())
    }

    async fn get_specialization(&self, id: i64) -> BookingResult<Option<Specialization>> {
        Ok(self.state()?.specializations.get(&id).cloned())
    }

    async fn list_doctors_for_specialization(
        &self,
        specialization_id: i64,
    ) -> BookingResult<Vec<Doctor>> {
        let state = self.state()?;
        Ok(state
            .doctors
            .values()
            .filter(|d| d.specialization_id == specialization_id)
            .cloned()
            .collect())
    }

    async fn doctor_ids_for_specialization(&self, specialization_id: i64) -> BookingResult<Vec<i64>> {
        let state = self.state()?;
        Ok(state
            .doctors
            .values()
            .filter(|d| d.specialization_id == specialization_id)
            .map(|d| d.id)
            .collect())
    }

    async fn average_rating(&self, doctor_id: i64) -> BookingResult<Option<f64>> {
        let state = self.state()?;
        let ratings: Vec<f64> = state
            .appointments
            .values()
            .filter(|a| a.doctor_id == doctor_id)
            .filter_map(|a| a.rating)
            .collect();

        if ratings.is_empty() {
            return Ok(None);
        }
        Ok(Some(ratings.iter().sum::<f64>() / ratings.len() as f64))
    }

    async fn set_doctor_rating(&self, doctor_id: i64, rating: f64) -> BookingResult<()> {
        let mut state = self.state()?;
        let doctor = state
            .doctors
            .get_mut(&doctor_id)
            .ok_or_else(|| BookingError::NotFound(format!("Doctor with ID {doctor_id} not found")))?;
        doctor.rating = Some(rating);
        Ok(())
    }

    async fn list_specializations(&self) -> BookingResult<Vec<Specialization>> {
        Ok(self.state()?.specializations.values().cloned().collect())
    }

    async fn create_specialization(
        &self,
        specialization: NewSpecialization,
    ) -> BookingResult<Specialization> {
        let mut state = self.state()?;
        let created = specialization.with_id(next_id(&state.specializations));
        state.specializations.insert(created.id, created.clone());
        Ok(created)
    }

    async fn delete_specialization(&self, id: i64) -> BookingResult<bool> {
        let mut state = self.state()?;
        if state.specializations.remove(&id).is_none() {
            return Ok(false);
        }

        let doctor_ids: Vec<i64> = state
            .doctors
            .values()
            .filter(|d| d.specialization_id == id)
            .map(|d| d.id)
            .collect();
        for doctor_id in doctor_ids {
            state.remove_doctor(doctor_id);
        }
        Ok(true)
    }

    async fn create_doctor(&self, doctor: NewDoctor) -> BookingResult<Option<Doctor>> {
        let mut state = self.state()?;
        if !state.specializations.contains_key(&doctor.specialization_id) {
            return Ok(None);
        }
        let created = doctor.with_id(next_id(&state.doctors));
        state.doctors.insert(created.id, created.clone());
        Ok(Some(created))
    }

    async fn delete_doctor(&self, id: i64) -> BookingResult<bool> {
        Ok(self.state()?.remove_doctor(id))
    }
}
