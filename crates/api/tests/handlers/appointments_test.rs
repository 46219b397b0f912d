use axum::http::StatusCode;
use clinicbook_core::{
    errors::BookingError,
    models::{
        appointment::{AppointmentResponse, AppointmentStatus, PatientAppointmentResponse},
        schedule::ScheduleResponse,
        slot::Slot,
    },
    store::BookingOutcome,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{
    date, past_appointment, seeded_server, time, TestContext, DOCTOR_ID, SLOT_DATE,
};

fn booking(patient_id: i64, time: &str) -> Value {
    json!({
        "doctor_id": DOCTOR_ID,
        "patient_id": patient_id,
        "date": SLOT_DATE,
        "time": time,
    })
}

#[tokio::test]
async fn test_create_appointment() {
    let (_store, server) = seeded_server().await;

    let response = server.post("/api/appointments").json(&booking(42, "09:20:00")).await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let appointment: AppointmentResponse = response.json();
    assert_eq!(appointment.doctor_id, DOCTOR_ID);
    assert_eq!(appointment.patient_id, 42);
    assert_eq!(appointment.date, date(2030, 1, 10));
    assert_eq!(appointment.time, time(9, 20));
    assert_eq!(appointment.status, AppointmentStatus::Scheduled);
    assert_eq!(appointment.rating, 5.0);
}

#[tokio::test]
async fn test_double_booking_conflicts() {
    let (_store, server) = seeded_server().await;
    server.post("/api/appointments").json(&booking(1, "09:00:00")).await;

    let response = server.post("/api/appointments").json(&booking(2, "09:00:00")).await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["status"], "failure");
    assert!(body["message"].as_str().unwrap().starts_with("Slot is busy"));
}

#[tokio::test]
async fn test_booking_unknown_slot_is_not_found() {
    let (_store, server) = seeded_server().await;

    let response = server.post("/api/appointments").json(&booking(1, "09:10:00")).await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case(json!({"doctor_id": 5, "patient_id": 1, "date": "10.01.2030", "time": "09:00:00"}))]
#[case(json!({"doctor_id": 5, "patient_id": 1, "date": "2030-01-10", "time": "nine"}))]
#[case(json!({"doctor_id": 0, "patient_id": 1, "date": "2030-01-10", "time": "09:00:00"}))]
#[tokio::test]
async fn test_malformed_booking_is_bad_request(#[case] payload: Value) {
    let (_store, server) = seeded_server().await;

    let response = server.post("/api/appointments").json(&payload).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_appointment() {
    let (_store, server) = seeded_server().await;
    let created: AppointmentResponse = server
        .post("/api/appointments")
        .json(&booking(7, "09:40:00"))
        .await
        .json();

    let response = server.get(&format!("/api/appointments/{}", created.id)).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<AppointmentResponse>(), created);
}

#[tokio::test]
async fn test_get_unknown_appointment() {
    let (_store, server) = seeded_server().await;

    let missing = server.get(&format!("/api/appointments/{}", Uuid::new_v4())).await;
    let malformed = server.get("/api/appointments/not-a-uuid").await;

    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(malformed.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rate_appointment() {
    let (_store, server) = seeded_server().await;
    let created: AppointmentResponse = server
        .post("/api/appointments")
        .json(&booking(7, "09:00:00"))
        .await
        .json();
    let path = format!("/api/appointments/{}", created.id);

    let response = server.patch(&path).json(&json!({ "rating": 3.5 })).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let rated: AppointmentResponse = response.json();
    assert_eq!(rated.rating, 3.5);
    assert_eq!(rated.status, AppointmentStatus::Scheduled);

    let rejected = server.patch(&path).json(&json!({ "rating": 6 })).await;
    assert_eq!(rejected.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(server.get(&path).await.json::<AppointmentResponse>().rating, 3.5);
}

#[tokio::test]
async fn test_cancel_appointment_releases_slot() {
    let (_store, server) = seeded_server().await;
    let created: AppointmentResponse = server
        .post("/api/appointments")
        .json(&booking(7, "09:20:00"))
        .await
        .json();
    let path = format!("/api/appointments/{}", created.id);

    assert_eq!(server.delete(&path).await.status_code(), StatusCode::NO_CONTENT);
    assert_eq!(server.delete(&path).await.status_code(), StatusCode::NO_CONTENT);
    assert_eq!(
        server.get(&path).await.json::<AppointmentResponse>().status,
        AppointmentStatus::Canceled
    );

    let schedule: ScheduleResponse = server
        .get(&format!("/api/doctors/{DOCTOR_ID}/schedule"))
        .add_query_param("date", SLOT_DATE)
        .await
        .json();
    assert!(schedule.slots.iter().all(|slot: &Slot| slot.is_available));

    let rebooked = server.post("/api/appointments").json(&booking(8, "09:20:00")).await;
    assert_eq!(rebooked.status_code(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_cancel_unknown_appointment() {
    let (_store, server) = seeded_server().await;

    let response = server.delete(&format!("/api/appointments/{}", Uuid::new_v4())).await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patient_appointments_are_promoted_and_ordered() {
    let (store, server) = seeded_server().await;
    store.insert_appointment(past_appointment(DOCTOR_ID, 42, None)).unwrap();
    server.post("/api/appointments").json(&booking(42, "09:40:00")).await;
    server.post("/api/appointments").json(&booking(43, "09:00:00")).await;

    let response = server.get("/api/patients/42/appointments").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let appointments: Vec<PatientAppointmentResponse> = response.json();
    let summary: Vec<_> = appointments
        .iter()
        .map(|a| (a.appointment.date, a.appointment.status))
        .collect();
    assert_eq!(
        summary,
        vec![
            (date(2021, 3, 3), AppointmentStatus::Completed),
            (date(2030, 1, 10), AppointmentStatus::Scheduled),
        ]
    );
    assert!(appointments.iter().all(|a| {
        a.doctor_full_name.as_deref() == Some("Petrov Ivan Sergeevich")
            && a.specialization_doctor.as_deref() == Some("Therapist")
    }));
}

#[tokio::test]
async fn test_patient_listing_flattens_appointment_fields() {
    let (_store, server) = seeded_server().await;
    server.post("/api/appointments").json(&booking(42, "09:40:00")).await;

    let body: Value = server.get("/api/patients/42/appointments").await.json();

    let entry = &body[0];
    assert_eq!(entry["doctor_id"], DOCTOR_ID);
    assert_eq!(entry["time"], "09:40:00");
    assert_eq!(entry["status"], "SCHEDULED");
    assert_eq!(entry["rating"], 5.0);
    assert_eq!(entry["doctor_full_name"], "Petrov Ivan Sergeevich");
    assert_eq!(entry["specialization_doctor"], "Therapist");
}

#[test_log::test(tokio::test)]
async fn test_storage_failure_while_booking_is_unavailable() {
    let mut ctx = TestContext::new();
    ctx.slot_repo.expect_find_slot().returning(|key| {
        Ok(Some(Slot {
            doctor_id: key.doctor_id,
            date: key.date,
            start: key.start,
            end: key.start + chrono::Duration::minutes(20),
            is_available: true,
        }))
    });
    ctx.appointment_repo
        .expect_book_slot()
        .returning(|_, _| Err(BookingError::Database(eyre::eyre!("connection reset by peer"))));
    let server = ctx.into_server();

    let response = server.post("/api/appointments").json(&booking(1, "09:00:00")).await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert!(body["message"].as_str().unwrap().starts_with("Booking failed"));
}

#[tokio::test]
async fn test_lost_race_is_conflict() {
    let mut ctx = TestContext::new();
    ctx.slot_repo.expect_find_slot().returning(|key| {
        Ok(Some(Slot {
            doctor_id: key.doctor_id,
            date: key.date,
            start: key.start,
            end: key.start + chrono::Duration::minutes(20),
            is_available: true,
        }))
    });
    ctx.appointment_repo
        .expect_book_slot()
        .times(1)
        .returning(|_, _| Ok(BookingOutcome::SlotBusy));
    let server = ctx.into_server();

    let response = server.post("/api/appointments").json(&booking(1, "09:00:00")).await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[test_log::test(tokio::test)]
async fn test_storage_failure_while_canceling_is_unavailable() {
    let mut ctx = TestContext::new();
    ctx.appointment_repo
        .expect_cancel_appointment()
        .returning(|_| Err(BookingError::Database(eyre::eyre!("deadlock detected"))));
    let server = ctx.into_server();

    let response = server.delete(&format!("/api/appointments/{}", Uuid::new_v4())).await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}
