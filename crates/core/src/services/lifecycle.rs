use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info};

use super::bounded;
use crate::config::BookingConfig;
use crate::errors::BookingResult;
use crate::store::{AppointmentScope, AppointmentStore};

/// Completes overdue appointments when they are read.
///
/// There is no background job: callers run a pass right before listing
/// appointments, and the listing waits for it to finish.
#[derive(Clone)]
pub struct StatusLifecycle {
    appointments: Arc<dyn AppointmentStore>,
    config: BookingConfig,
}

impl StatusLifecycle {
    pub fn new(appointments: Arc<dyn AppointmentStore>, config: BookingConfig) -> Self {
        Self {
            appointments,
            config,
        }
    }

    pub async fn promote_overdue_for_patient(&self, patient_id: i64) -> BookingResult<u64> {
        self.promote_overdue(AppointmentScope::Patient(patient_id)).await
    }

    pub async fn promote_overdue_for_doctor(&self, doctor_id: i64) -> BookingResult<u64> {
        self.promote_overdue(AppointmentScope::Doctor(doctor_id)).await
    }

    /// Promotes against the local wall clock, which is the clock slot dates
    /// and times are expressed in.
    pub async fn promote_overdue(&self, scope: AppointmentScope) -> BookingResult<u64> {
        self.promote_overdue_at(scope, Local::now().naive_local()).await
    }

    /// Moves every Scheduled appointment in `scope` that started strictly
    /// before `now` to Completed. Returns the number promoted; a second pass
    /// with the same `now` returns 0.
    pub async fn promote_overdue_at(
        &self,
        scope: AppointmentScope,
        now: NaiveDateTime,
    ) -> BookingResult<u64> {
        let promoted = bounded(
            "complete_overdue",
            self.config.query_timeout,
            self.appointments.complete_overdue(scope, now),
        )
        .await?;

        if promoted > 0 {
            info!(%scope, promoted, "Completed overdue appointments");
        } else {
            debug!(%scope, "No overdue appointments");
        }
        Ok(promoted)
    }
}
