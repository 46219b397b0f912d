use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{error, info};

use super::{bounded, unit_failed};
use crate::config::BookingConfig;
use crate::errors::{BookingError, BookingResult};
use crate::models::{schedule::ScheduleSpec, slot::Slot};
use crate::store::SlotStore;

/// Generates slot batches and reads them back.
#[derive(Clone)]
pub struct ScheduleService {
    slots: Arc<dyn SlotStore>,
    config: BookingConfig,
}

impl ScheduleService {
    pub fn new(slots: Arc<dyn SlotStore>, config: BookingConfig) -> Self {
        Self { slots, config }
    }

    /// Generates the slots described by `spec` and stores them as one batch.
    ///
    /// Validation errors are returned before storage is touched. A storage
    /// failure rolls back the whole batch and reports `PersistFailed`.
    pub async fn generate_and_persist(&self, spec: ScheduleSpec) -> BookingResult<Vec<Slot>> {
        let slots = spec.generate()?;
        info!(
            doctor_id = spec.doctor_id,
            date = %spec.date,
            count = slots.len(),
            "Persisting generated schedule"
        );

        bounded(
            "persist_slots",
            self.config.query_timeout,
            self.slots.persist_slots(spec.doctor_id, &slots),
        )
        .await
        .map_err(|err| {
            error!(doctor_id = spec.doctor_id, error = %err, "Failed to persist schedule");
            unit_failed(err, BookingError::PersistFailed)
        })?;

        Ok(slots)
    }

    /// The doctor's slots from `from` onwards, ordered by date and start time.
    pub async fn schedule_from(&self, doctor_id: i64, from: NaiveDate) -> BookingResult<Vec<Slot>> {
        bounded(
            "list_slots_from",
            self.config.query_timeout,
            self.slots.list_slots_from(doctor_id, from),
        )
        .await
    }
}
