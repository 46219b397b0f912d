use axum::http::StatusCode;
use clinicbook_core::models::doctor::Specialization;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};

use crate::test_utils::{past_appointment, seeded_server, DOCTOR_ID, SPECIALIZATION_ID};

#[tokio::test]
async fn test_create_and_list_specializations() {
    let (_store, server) = seeded_server().await;

    let response = server
        .post("/api/specializations")
        .json(&json!({
            "specialization": " Cardiology ",
            "specialization_doctor": "Cardiologist",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let created: Specialization = response.json();
    assert_eq!(created.specialization, "Cardiology");
    assert_eq!(created.description, None);

    let listed: Vec<Specialization> = server.get("/api/specializations").await.json();
    let ids: Vec<_> = listed.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![SPECIALIZATION_ID, created.id]);
}

#[rstest]
#[case(json!({ "specialization": "", "specialization_doctor": "Cardiologist" }))]
#[case(json!({ "specialization": "Cardiology", "specialization_doctor": "  " }))]
#[tokio::test]
async fn test_blank_specialization_is_bad_request(#[case] payload: Value) {
    let (_store, server) = seeded_server().await;

    let response = server.post("/api/specializations").json(&payload).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let listed: Vec<Specialization> = server.get("/api/specializations").await.json();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn test_delete_specialization_removes_its_doctors() {
    let (store, server) = seeded_server().await;
    store.insert_appointment(past_appointment(DOCTOR_ID, 1, Some(4.0))).unwrap();

    let response = server
        .delete(&format!("/api/specializations/{SPECIALIZATION_ID}"))
        .await;

    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    assert_eq!(
        server.get(&format!("/api/doctors/{DOCTOR_ID}")).await.status_code(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(server.get("/api/doctors/6").await.status_code(), StatusCode::NOT_FOUND);
    assert!(store.all_appointments().unwrap().is_empty());
    assert_eq!(
        server
            .get(&format!("/api/specializations/{SPECIALIZATION_ID}/doctors"))
            .await
            .status_code(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_delete_unknown_specialization() {
    let (_store, server) = seeded_server().await;

    let response = server.delete("/api/specializations/77").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["status"], "failure");
}
