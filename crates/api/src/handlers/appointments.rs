use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use clinicbook_core::models::appointment::{
    AppointmentResponse, CreateAppointmentRequest, PatientAppointmentResponse,
    RateAppointmentRequest,
};
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<AppointmentResponse>), AppError> {
    let appointment = state.clinic.create_appointment(&payload).await?;

    Ok((StatusCode::CREATED, Json(appointment.into())))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let appointment = state.clinic.get_appointment(id).await?;

    Ok(Json(appointment.into()))
}

/// Sets the patient's rating and returns the updated appointment.
#[axum::debug_handler]
pub async fn rate_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RateAppointmentRequest>,
) -> Result<Json<AppointmentResponse>, AppError> {
    state.clinic.update_appointment_rating(id, &payload).await?;
    let appointment = state.clinic.get_appointment(id).await?;

    Ok(Json(appointment.into()))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.clinic.cancel_appointment(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// The patient's appointments with the doctor's name and specialization.
#[axum::debug_handler]
pub async fn list_patient_appointments(
    State(state): State<Arc<ApiState>>,
    Path(patient_id): Path<i64>,
) -> Result<Json<Vec<PatientAppointmentResponse>>, AppError> {
    let appointments = state
        .clinic
        .list_patient_appointment_details(patient_id)
        .await?;

    Ok(Json(appointments))
}
