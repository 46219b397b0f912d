//! Registration and removal of specializations and doctors.

use std::sync::Arc;

use tracing::info;

use super::bounded;
use crate::config::BookingConfig;
use crate::errors::{BookingError, BookingResult};
use crate::models::doctor::{
    CreateDoctorRequest, CreateSpecializationRequest, Doctor, Specialization,
};
use crate::store::DoctorStore;

#[derive(Clone)]
pub struct DoctorDirectory {
    doctors: Arc<dyn DoctorStore>,
    config: BookingConfig,
}

impl DoctorDirectory {
    pub fn new(doctors: Arc<dyn DoctorStore>, config: BookingConfig) -> Self {
        Self { doctors, config }
    }

    pub async fn list_specializations(&self) -> BookingResult<Vec<Specialization>> {
        bounded(
            "list_specializations",
            self.config.query_timeout,
            self.doctors.list_specializations(),
        )
        .await
    }

    pub async fn create_specialization(
        &self,
        request: &CreateSpecializationRequest,
    ) -> BookingResult<Specialization> {
        let specialization = request.validate()?;

        let created = bounded(
            "create_specialization",
            self.config.query_timeout,
            self.doctors.create_specialization(specialization),
        )
        .await?;

        info!(specialization_id = created.id, name = %created.specialization, "Specialization created");
        Ok(created)
    }

    /// Deletes the specialization along with every doctor practising it.
    pub async fn delete_specialization(&self, id: i64) -> BookingResult<()> {
        let deleted = bounded(
            "delete_specialization",
            self.config.query_timeout,
            self.doctors.delete_specialization(id),
        )
        .await?;

        if !deleted {
            return Err(BookingError::NotFound(format!(
                "Specialization with ID {id} not found"
            )));
        }
        info!(specialization_id = id, "Specialization deleted");
        Ok(())
    }

    /// # Errors
    ///
    /// * `BookingError::InvalidInput` - a required field is blank
    /// * `BookingError::NotFound` - the specialization does not exist
    pub async fn create_doctor(&self, request: &CreateDoctorRequest) -> BookingResult<Doctor> {
        let doctor = request.validate()?;
        let specialization_id = doctor.specialization_id;

        let created = bounded(
            "create_doctor",
            self.config.query_timeout,
            self.doctors.create_doctor(doctor),
        )
        .await?
        .ok_or_else(|| {
            BookingError::NotFound(format!(
                "Specialization with ID {specialization_id} not found"
            ))
        })?;

        info!(doctor_id = created.id, specialization_id, "Doctor created");
        Ok(created)
    }

    /// Deletes the doctor with their schedule and appointments.
    pub async fn delete_doctor(&self, id: i64) -> BookingResult<()> {
        let deleted = bounded(
            "delete_doctor",
            self.config.query_timeout,
            self.doctors.delete_doctor(id),
        )
        .await?;

        if !deleted {
            return Err(BookingError::NotFound(format!("Doctor with ID {id} not found")));
        }
        info!(doctor_id = id, "Doctor deleted");
        Ok(())
    }
}
