use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use clinicbook_core::{
    models::{
        appointment::AppointmentResponse,
        doctor::{CreateDoctorRequest, Doctor, SpecializationDoctorsResponse},
    },
    services::rating::RatingBatchSummary,
};

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<ApiState>>,
    Path(doctor_id): Path<i64>,
) -> Result<Json<Doctor>, AppError> {
    Ok(Json(state.clinic.get_doctor(doctor_id).await?))
}

#[axum::debug_handler]
pub async fn create_doctor(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateDoctorRequest>,
) -> Result<(StatusCode, Json<Doctor>), AppError> {
    let doctor = state.clinic.create_doctor(&payload).await?;

    Ok((StatusCode::CREATED, Json(doctor)))
}

/// Removes the doctor along with their schedule and appointments.
#[axum::debug_handler]
pub async fn delete_doctor(
    State(state): State<Arc<ApiState>>,
    Path(doctor_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.clinic.delete_doctor(doctor_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn list_doctor_appointments(
    State(state): State<Arc<ApiState>>,
    Path(doctor_id): Path<i64>,
) -> Result<Json<Vec<AppointmentResponse>>, AppError> {
    let appointments = state.clinic.list_appointments_for_doctor(doctor_id).await?;

    Ok(Json(appointments.into_iter().map(Into::into).collect()))
}

#[axum::debug_handler]
pub async fn list_specialization_doctors(
    State(state): State<Arc<ApiState>>,
    Path(specialization_id): Path<i64>,
) -> Result<Json<SpecializationDoctorsResponse>, AppError> {
    let listing = state
        .clinic
        .list_doctors_for_specialization(specialization_id)
        .await?;

    Ok(Json(listing))
}

/// Recomputes every doctor's rating in the specialization and reports the
/// per-doctor outcome. Individual failures do not fail the request.
#[axum::debug_handler]
pub async fn recompute_specialization_ratings(
    State(state): State<Arc<ApiState>>,
    Path(specialization_id): Path<i64>,
) -> Result<Json<RatingBatchSummary>, AppError> {
    let batch = state
        .clinic
        .recompute_ratings_for_specialization(specialization_id)
        .await?;

    Ok(Json(batch.summary()))
}
