//! # Clinic Service
//!
//! The entry point HTTP handlers and other collaborators call. It decodes
//! typed requests, runs the read-time corrections (status promotion, rating
//! recomputation) ahead of the reads they guard, and delegates to the
//! booking, schedule, lifecycle, rating and directory services.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::warn;
use uuid::Uuid;

use super::bounded;
use super::booking::BookingCoordinator;
use super::directory::DoctorDirectory;
use super::lifecycle::StatusLifecycle;
use super::rating::{RatingAggregator, RatingBatch};
use super::schedule::ScheduleService;
use crate::config::BookingConfig;
use crate::errors::{BookingError, BookingResult};
use crate::models::{
    appointment::{
        Appointment, CreateAppointmentRequest, PatientAppointmentResponse, RateAppointmentRequest,
    },
    doctor::{
        CreateDoctorRequest, CreateSpecializationRequest, Doctor, Specialization,
        SpecializationDoctorsResponse,
    },
    schedule::GenerateScheduleRequest,
    slot::Slot,
};
use crate::store::{AppointmentScope, AppointmentStore, DoctorStore, SlotStore};

#[derive(Clone)]
pub struct ClinicService {
    booking: BookingCoordinator,
    schedules: ScheduleService,
    lifecycle: StatusLifecycle,
    ratings: RatingAggregator,
    directory: DoctorDirectory,
    appointments: Arc<dyn AppointmentStore>,
    doctors: Arc<dyn DoctorStore>,
    config: BookingConfig,
}

impl ClinicService {
    /// Builds the service over one store implementing every storage trait.
    pub fn new<S>(store: Arc<S>, config: BookingConfig) -> Self
    where
        S: SlotStore + AppointmentStore + DoctorStore + 'static,
    {
        Self::from_stores(store.clone(), store.clone(), store, config)
    }

    pub fn from_stores(
        slots: Arc<dyn SlotStore>,
        appointments: Arc<dyn AppointmentStore>,
        doctors: Arc<dyn DoctorStore>,
        config: BookingConfig,
    ) -> Self {
        Self {
            booking: BookingCoordinator::new(slots.clone(), appointments.clone(), config),
            schedules: ScheduleService::new(slots, config),
            lifecycle: StatusLifecycle::new(appointments.clone(), config),
            ratings: RatingAggregator::new(doctors.clone(), config),
            directory: DoctorDirectory::new(doctors.clone(), config),
            appointments,
            doctors,
            config,
        }
    }

    pub async fn create_appointment(
        &self,
        request: &CreateAppointmentRequest,
    ) -> BookingResult<Appointment> {
        let booking = request.validate()?;
        self.booking.create_appointment(booking).await
    }

    pub async fn update_appointment_rating(
        &self,
        id: Uuid,
        request: &RateAppointmentRequest,
    ) -> BookingResult<()> {
        let rating = request.validate()?;
        self.booking.update_appointment_rating(id, rating).await
    }

    pub async fn cancel_appointment(&self, id: Uuid) -> BookingResult<()> {
        self.booking.cancel_appointment(id).await
    }

    pub async fn get_appointment(&self, id: Uuid) -> BookingResult<Appointment> {
        self.booking.get_appointment(id).await
    }

    pub async fn generate_and_persist_schedule(
        &self,
        doctor_id: i64,
        request: &GenerateScheduleRequest,
    ) -> BookingResult<Vec<Slot>> {
        let spec = request.validate(doctor_id)?;
        self.schedules.generate_and_persist(spec).await
    }

    pub async fn get_schedule_for_doctor(
        &self,
        doctor_id: i64,
        from: NaiveDate,
    ) -> BookingResult<Vec<Slot>> {
        self.schedules.schedule_from(doctor_id, from).await
    }

    /// Reads a doctor after refreshing their rating. A failed refresh is
    /// logged and the last stored rating is returned.
    pub async fn get_doctor(&self, doctor_id: i64) -> BookingResult<Doctor> {
        if let Err(err) = self.ratings.recompute_rating(doctor_id).await {
            warn!(doctor_id, error = %err, "Could not refresh doctor rating");
        }

        bounded(
            "get_doctor",
            self.config.query_timeout,
            self.doctors.get_doctor(doctor_id),
        )
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Doctor with ID {doctor_id} not found")))
    }

    /// Lists a specialization's doctors after refreshing all their ratings.
    pub async fn list_doctors_for_specialization(
        &self,
        specialization_id: i64,
    ) -> BookingResult<SpecializationDoctorsResponse> {
        let limit = self.config.query_timeout;
        let specialization = bounded(
            "get_specialization",
            limit,
            self.doctors.get_specialization(specialization_id),
        )
        .await?
        .ok_or_else(|| {
            BookingError::NotFound(format!("Specialization with ID {specialization_id} not found"))
        })?;

        if let Err(err) = self.ratings.recompute_for_specialization(specialization_id).await {
            warn!(specialization_id, error = %err, "Could not refresh specialization ratings");
        }

        let doctors = bounded(
            "list_doctors_for_specialization",
            limit,
            self.doctors.list_doctors_for_specialization(specialization_id),
        )
        .await?;

        Ok(SpecializationDoctorsResponse {
            specialization,
            doctors,
        })
    }

    pub async fn recompute_ratings_for_specialization(
        &self,
        specialization_id: i64,
    ) -> BookingResult<RatingBatch> {
        self.ratings.recompute_for_specialization(specialization_id).await
    }

    pub async fn list_specializations(&self) -> BookingResult<Vec<Specialization>> {
        self.directory.list_specializations().await
    }

    pub async fn create_specialization(
        &self,
        request: &CreateSpecializationRequest,
    ) -> BookingResult<Specialization> {
        self.directory.create_specialization(request).await
    }

    pub async fn delete_specialization(&self, specialization_id: i64) -> BookingResult<()> {
        self.directory.delete_specialization(specialization_id).await
    }

    pub async fn create_doctor(&self, request: &CreateDoctorRequest) -> BookingResult<Doctor> {
        self.directory.create_doctor(request).await
    }

    pub async fn delete_doctor(&self, doctor_id: i64) -> BookingResult<()> {
        self.directory.delete_doctor(doctor_id).await
    }

    /// Completes the patient's overdue appointments, then lists them all
    /// ordered by date and time.
    pub async fn list_appointments_for_patient(
        &self,
        patient_id: i64,
    ) -> BookingResult<Vec<Appointment>> {
        self.lifecycle.promote_overdue_for_patient(patient_id).await?;
        self.list_appointments(AppointmentScope::Patient(patient_id)).await
    }

    /// The patient's appointments, each with the doctor's full name and
    /// specialization.
    pub async fn list_patient_appointment_details(
        &self,
        patient_id: i64,
    ) -> BookingResult<Vec<PatientAppointmentResponse>> {
        let appointments = self.list_appointments_for_patient(patient_id).await?;
        let limit = self.config.query_timeout;

        let mut doctors: BTreeMap<i64, Option<Doctor>> = BTreeMap::new();
        let mut specializations: BTreeMap<i64, Option<Specialization>> = BTreeMap::new();
        for appointment in &appointments {
            if doctors.contains_key(&appointment.doctor_id) {
                continue;
            }
            let doctor = bounded(
                "get_doctor",
                limit,
                self.doctors.get_doctor(appointment.doctor_id),
            )
            .await?;
            if let Some(doctor) = &doctor {
                if !specializations.contains_key(&doctor.specialization_id) {
                    let specialization = bounded(
                        "get_specialization",
                        limit,
                        self.doctors.get_specialization(doctor.specialization_id),
                    )
                    .await?;
                    specializations.insert(doctor.specialization_id, specialization);
                }
            }
            doctors.insert(appointment.doctor_id, doctor);
        }

        Ok(appointments
            .into_iter()
            .map(|appointment| {
                let doctor = doctors.get(&appointment.doctor_id).and_then(Option::as_ref);
                let specialization = doctor
                    .and_then(|d| specializations.get(&d.specialization_id))
                    .and_then(Option::as_ref);
                PatientAppointmentResponse::new(appointment, doctor, specialization)
            })
            .collect())
    }

    pub async fn list_appointments_for_doctor(
        &self,
        doctor_id: i64,
    ) -> BookingResult<Vec<Appointment>> {
        self.lifecycle.promote_overdue_for_doctor(doctor_id).await?;
        self.list_appointments(AppointmentScope::Doctor(doctor_id)).await
    }

    async fn list_appointments(&self, scope: AppointmentScope) -> BookingResult<Vec<Appointment>> {
        bounded(
            "list_appointments",
            self.config.query_timeout,
            self.appointments.list_appointments(scope),
        )
        .await
    }
}
