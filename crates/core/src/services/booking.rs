//! # Booking Coordinator
//!
//! Pairs every appointment write with the matching slot write:
//!
//! - booking reserves a free slot and inserts a Scheduled appointment
//! - cancellation marks the appointment Canceled and frees its slot
//!
//! Each pair commits as one unit inside the store. The availability check
//! that decides a booking is a conditional update in that unit, so two
//! concurrent bookings of one slot cannot both succeed.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{bounded, transactional, unit_failed};
use crate::config::BookingConfig;
use crate::errors::{BookingError, BookingResult};
use crate::models::appointment::{validate_rating, Appointment, NewAppointment};
use crate::store::{AppointmentStore, BookingOutcome, CancelOutcome, SlotStore};

#[derive(Clone)]
pub struct BookingCoordinator {
    slots: Arc<dyn SlotStore>,
    appointments: Arc<dyn AppointmentStore>,
    config: BookingConfig,
}

impl BookingCoordinator {
    pub fn new(
        slots: Arc<dyn SlotStore>,
        appointments: Arc<dyn AppointmentStore>,
        config: BookingConfig,
    ) -> Self {
        Self {
            slots,
            appointments,
            config,
        }
    }

    /// Books the slot starting at `booking.time` for the patient.
    ///
    /// # Errors
    ///
    /// * `BookingError::NotFound` - the doctor has no slot at that date and time
    /// * `BookingError::SlotBusy` - the slot is held by another appointment
    /// * `BookingError::BookingFailed` - the reservation could not commit; nothing changed
    /// * `BookingError::Timeout` - storage did not answer in time
    pub async fn create_appointment(&self, booking: NewAppointment) -> BookingResult<Appointment> {
        let key = booking.slot_key();
        let limit = self.config.query_timeout;
        info!(%key, patient_id = booking.patient_id, "Booking appointment");

        let slot = bounded("find_slot", limit, self.slots.find_slot(key))
            .await?
            .ok_or_else(|| BookingError::NotFound(format!("No schedule slot for {key}")))?;

        // Fast path only; the store re-checks availability atomically below.
        if !slot.is_available {
            warn!(%key, "Slot is already booked");
            return Err(BookingError::SlotBusy(key.to_string()));
        }

        let outcome = bounded(
            "book_slot",
            limit,
            self.appointments.book_slot(Uuid::new_v4(), booking),
        )
        .await
        .map_err(|err| transactional(err, BookingError::BookingFailed))?;

        match outcome {
            BookingOutcome::Booked(appointment) => {
                info!(appointment_id = %appointment.id, %key, "Appointment booked");
                Ok(appointment)
            }
            BookingOutcome::SlotBusy => {
                warn!(%key, "Slot was taken by a concurrent booking");
                Err(BookingError::SlotBusy(key.to_string()))
            }
            BookingOutcome::SlotMissing => {
                Err(BookingError::NotFound(format!("No schedule slot for {key}")))
            }
        }
    }

    /// Cancels a scheduled appointment and releases its slot. Cancelling a
    /// completed or already canceled appointment succeeds without changes.
    ///
    /// A storage failure or an expired deadline reports `CancelFailed`; the
    /// appointment and its slot are left as they were.
    pub async fn cancel_appointment(&self, id: Uuid) -> BookingResult<()> {
        let outcome = bounded(
            "cancel_appointment",
            self.config.query_timeout,
            self.appointments.cancel_appointment(id),
        )
        .await
        .map_err(|err| unit_failed(err, BookingError::CancelFailed))?;

        match outcome {
            CancelOutcome::Canceled(appointment) => {
                info!(appointment_id = %id, key = %appointment.slot_key(), "Appointment canceled");
                Ok(())
            }
            CancelOutcome::AlreadyTerminal(appointment) => {
                debug!(appointment_id = %id, status = %appointment.status, "Appointment already final");
                Ok(())
            }
            CancelOutcome::Missing => Err(appointment_not_found(id)),
        }
    }

    /// Stores the patient's rating. Only the rating field changes.
    pub async fn update_appointment_rating(&self, id: Uuid, rating: f64) -> BookingResult<()> {
        let rating = validate_rating(rating)?;

        let updated = bounded(
            "set_rating",
            self.config.query_timeout,
            self.appointments.set_rating(id, rating),
        )
        .await?;

        if !updated {
            return Err(appointment_not_found(id));
        }
        info!(appointment_id = %id, rating, "Appointment rated");
        Ok(())
    }

    pub async fn get_appointment(&self, id: Uuid) -> BookingResult<Appointment> {
        bounded(
            "get_appointment",
            self.config.query_timeout,
            self.appointments.get_appointment(id),
        )
        .await?
        .ok_or_else(|| appointment_not_found(id))
    }
}

fn appointment_not_found(id: Uuid) -> BookingError {
    BookingError::NotFound(format!("Appointment with ID {id} not found"))
}
