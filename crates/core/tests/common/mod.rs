#![allow(dead_code)]

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use clinicbook_core::{
    generator,
    models::{
        appointment::{Appointment, AppointmentStatus},
        doctor::{Doctor, Specialization},
    },
    store::{SlotStore, memory::InMemoryStore},
    BookingConfig, ClinicService,
};
use uuid::Uuid;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn doctor(id: i64, specialization_id: i64) -> Doctor {
    Doctor {
        id,
        surname: format!("Surname{id}"),
        name: format!("Name{id}"),
        patronymic: None,
        specialization_id,
        education: Some("Medical University".to_string()),
        progress: None,
        rating: None,
        photo_path: None,
    }
}

pub fn specialization(id: i64) -> Specialization {
    Specialization {
        id,
        specialization: "Cardiology".to_string(),
        specialization_doctor: "Cardiologist".to_string(),
        description: None,
    }
}

pub fn appointment(
    doctor_id: i64,
    patient_id: i64,
    date: NaiveDate,
    time: NaiveTime,
    status: AppointmentStatus,
    rating: Option<f64>,
) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        doctor_id,
        patient_id,
        date,
        time,
        status,
        rating,
    }
}

/// A clinic over an in-memory store holding doctor 5 (specialization 1)
/// with three 20-minute slots on 2030-01-10 from 09:00.
pub async fn seeded_clinic() -> (Arc<InMemoryStore>, ClinicService) {
    let store = Arc::new(InMemoryStore::new());
    store.insert_specialization(specialization(1)).unwrap();
    store.insert_doctor(doctor(5, 1)).unwrap();

    let slots = generator::generate(5, date(2030, 1, 10), time(9, 0), time(10, 0), 20).unwrap();
    store.persist_slots(5, &slots).await.unwrap();

    let clinic = ClinicService::new(store.clone(), BookingConfig::default());
    (store, clinic)
}
