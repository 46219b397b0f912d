use std::sync::Arc;

use axum_test::TestServer;
use chrono::{NaiveDate, NaiveTime};
use clinicbook_api::{app, ApiState};
use clinicbook_core::{
    generator,
    models::{
        appointment::{Appointment, AppointmentStatus},
        doctor::{Doctor, Specialization},
    },
    store::{memory::InMemoryStore, SlotStore},
    BookingConfig, ClinicService,
};
use clinicbook_db::mock::repositories::{MockAppointmentRepo, MockDoctorRepo, MockSlotRepo};
use uuid::Uuid;

pub const DOCTOR_ID: i64 = 5;
pub const SPECIALIZATION_ID: i64 = 1;
pub const SLOT_DATE: &str = "2030-01-10";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn doctor(id: i64, specialization_id: i64) -> Doctor {
    Doctor {
        id,
        surname: "Petrov".to_string(),
        name: "Ivan".to_string(),
        patronymic: Some("Sergeevich".to_string()),
        specialization_id,
        education: None,
        progress: None,
        rating: None,
        photo_path: None,
    }
}

pub fn past_appointment(doctor_id: i64, patient_id: i64, rating: Option<f64>) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        doctor_id,
        patient_id,
        date: date(2021, 3, 3),
        time: time(10, 0),
        status: AppointmentStatus::Scheduled,
        rating,
    }
}

/// Specialization 1 with doctors 5 and 6; doctor 5 has three 20-minute
/// slots on 2030-01-10 starting at 09:00.
pub async fn seeded_store() -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());
    store
        .insert_specialization(Specialization {
            id: SPECIALIZATION_ID,
            specialization: "Therapy".to_string(),
            specialization_doctor: "Therapist".to_string(),
            description: Some("General practice".to_string()),
        })
        .unwrap();
    store.insert_doctor(doctor(DOCTOR_ID, SPECIALIZATION_ID)).unwrap();
    store.insert_doctor(doctor(6, SPECIALIZATION_ID)).unwrap();

    let slots = generator::generate(DOCTOR_ID, date(2030, 1, 10), time(9, 0), time(10, 0), 20).unwrap();
    store.persist_slots(DOCTOR_ID, &slots).await.unwrap();

    store
}

pub fn server_for(clinic: ClinicService) -> TestServer {
    TestServer::new(app(ApiState::new(clinic))).unwrap()
}

pub async fn seeded_server() -> (Arc<InMemoryStore>, TestServer) {
    let store = seeded_store().await;
    let server = server_for(ClinicService::new(store.clone(), BookingConfig::default()));
    (store, server)
}

/// Mock stores for driving storage failures through the HTTP layer.
pub struct TestContext {
    pub slot_repo: MockSlotRepo,
    pub appointment_repo: MockAppointmentRepo,
    pub doctor_repo: MockDoctorRepo,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            slot_repo: MockSlotRepo::new(),
            appointment_repo: MockAppointmentRepo::new(),
            doctor_repo: MockDoctorRepo::new(),
        }
    }

    pub fn into_server(self) -> TestServer {
        server_for(ClinicService::from_stores(
            Arc::new(self.slot_repo),
            Arc::new(self.appointment_repo),
            Arc::new(self.doctor_repo),
            BookingConfig::default(),
        ))
    }
}
