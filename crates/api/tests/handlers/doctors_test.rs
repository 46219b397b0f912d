use axum::http::StatusCode;
use clinicbook_core::{
    errors::BookingError,
    models::{
        appointment::{AppointmentResponse, AppointmentStatus},
        doctor::{Doctor, SpecializationDoctorsResponse},
    },
    services::rating::RatingBatchSummary,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};

use crate::test_utils::{
    doctor, past_appointment, seeded_server, TestContext, DOCTOR_ID, SLOT_DATE,
    SPECIALIZATION_ID,
};

fn new_doctor(specialization_id: i64) -> Value {
    json!({
        "surname": "Sidorova",
        "name": "Maria",
        "patronymic": "Olegovna",
        "specialization_id": specialization_id,
        "education": "Medical Academy",
    })
}

#[tokio::test]
async fn test_get_doctor_returns_fresh_rating() {
    let (store, server) = seeded_server().await;
    store.insert_appointment(past_appointment(DOCTOR_ID, 1, Some(4.0))).unwrap();
    store.insert_appointment(past_appointment(DOCTOR_ID, 2, Some(5.0))).unwrap();

    let response = server.get(&format!("/api/doctors/{DOCTOR_ID}")).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let doctor: Doctor = response.json();
    assert_eq!(doctor.id, DOCTOR_ID);
    assert_eq!(doctor.rating, Some(4.5));
}

#[tokio::test]
async fn test_get_unknown_doctor() {
    let (_store, server) = seeded_server().await;

    let response = server.get("/api/doctors/404").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rating_failure_still_returns_doctor() {
    let mut ctx = TestContext::new();
    ctx.doctor_repo
        .expect_average_rating()
        .returning(|_| Err(BookingError::Database(eyre::eyre!("statement timeout"))));
    ctx.doctor_repo.expect_get_doctor().returning(|id| {
        Ok(Some(Doctor {
            rating: Some(4.1),
            ..doctor(id, 1)
        }))
    });
    let server = ctx.into_server();

    let response = server.get("/api/doctors/9").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Doctor>().rating, Some(4.1));
}

#[tokio::test]
async fn test_doctor_appointments_are_promoted() {
    let (store, server) = seeded_server().await;
    store.insert_appointment(past_appointment(DOCTOR_ID, 1, None)).unwrap();
    store.insert_appointment(past_appointment(6, 1, None)).unwrap();

    let response = server.get(&format!("/api/doctors/{DOCTOR_ID}/appointments")).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let appointments: Vec<AppointmentResponse> = response.json();
    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0].status, AppointmentStatus::Completed);
    assert_eq!(appointments[0].rating, 5.0);
}

#[tokio::test]
async fn test_specialization_doctors_have_fresh_ratings() {
    let (store, server) = seeded_server().await;
    store.insert_appointment(past_appointment(6, 1, Some(2.0))).unwrap();

    let response = server
        .get(&format!("/api/specializations/{SPECIALIZATION_ID}/doctors"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let listing: SpecializationDoctorsResponse = response.json();
    assert_eq!(listing.specialization.id, SPECIALIZATION_ID);
    let ratings: Vec<_> = listing.doctors.iter().map(|d| (d.id, d.rating)).collect();
    assert_eq!(ratings, vec![(DOCTOR_ID, None), (6, Some(2.0))]);
}

#[tokio::test]
async fn test_unknown_specialization() {
    let (_store, server) = seeded_server().await;

    let response = server.get("/api/specializations/77/doctors").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_recompute_specialization_ratings() {
    let (store, server) = seeded_server().await;
    store.insert_appointment(past_appointment(DOCTOR_ID, 1, Some(3.0))).unwrap();

    let response = server
        .post(&format!("/api/specializations/{SPECIALIZATION_ID}/ratings"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let summary: RatingBatchSummary = response.json();
    assert_eq!(summary.specialization_id, SPECIALIZATION_ID);
    assert_eq!(summary.updated.len(), 1);
    assert_eq!(summary.updated[0].doctor_id, DOCTOR_ID);
    assert_eq!(summary.updated[0].rating, 3.0);
    assert_eq!(summary.no_ratings, vec![6]);
    assert!(summary.failed.is_empty());
}

#[tokio::test]
async fn test_create_doctor_then_give_them_a_schedule() {
    let (_store, server) = seeded_server().await;

    let response = server
        .post("/api/doctors")
        .json(&new_doctor(SPECIALIZATION_ID))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let created: Doctor = response.json();
    assert_eq!(created.full_name(), "Sidorova Maria Olegovna");
    assert_eq!(created.specialization_id, SPECIALIZATION_ID);
    assert_eq!(created.rating, None);
    assert_eq!(created.progress, None);

    let schedule = server
        .post(&format!("/api/doctors/{}/schedule", created.id))
        .json(&json!({
            "date": SLOT_DATE,
            "start_time": "10:00:00",
            "end_time": "11:00:00",
            "slot_duration_minutes": 30,
        }))
        .await;
    assert_eq!(schedule.status_code(), StatusCode::CREATED);

    let fetched: Doctor = server.get(&format!("/api/doctors/{}", created.id)).await.json();
    assert_eq!(fetched, created);
}

#[rstest]
#[case(new_doctor(404), StatusCode::NOT_FOUND)]
#[case(json!({ "surname": " ", "name": "Maria", "specialization_id": 1 }), StatusCode::BAD_REQUEST)]
#[case(json!({ "surname": "Sidorova", "name": "Maria", "specialization_id": 0 }), StatusCode::BAD_REQUEST)]
#[tokio::test]
async fn test_rejected_doctor_is_not_created(#[case] payload: Value, #[case] expected: StatusCode) {
    let (_store, server) = seeded_server().await;

    let response = server.post("/api/doctors").json(&payload).await;

    assert_eq!(response.status_code(), expected);
    let listing: SpecializationDoctorsResponse = server
        .get(&format!("/api/specializations/{SPECIALIZATION_ID}/doctors"))
        .await
        .json();
    assert_eq!(listing.doctors.len(), 2);
}

#[tokio::test]
async fn test_delete_doctor_removes_schedule_and_appointments() {
    let (store, server) = seeded_server().await;
    store.insert_appointment(past_appointment(DOCTOR_ID, 1, None)).unwrap();

    let response = server.delete(&format!("/api/doctors/{DOCTOR_ID}")).await;

    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    assert_eq!(
        server.get(&format!("/api/doctors/{DOCTOR_ID}")).await.status_code(),
        StatusCode::NOT_FOUND
    );
    assert!(store.all_appointments().unwrap().is_empty());

    let booking = server
        .post("/api/appointments")
        .json(&json!({
            "doctor_id": DOCTOR_ID,
            "patient_id": 1,
            "date": SLOT_DATE,
            "time": "09:00:00",
        }))
        .await;
    assert_eq!(booking.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_doctor() {
    let (_store, server) = seeded_server().await;

    let response = server.delete("/api/doctors/404").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
