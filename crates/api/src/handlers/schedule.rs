use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Local;
use clinicbook_core::models::schedule::{
    GenerateScheduleRequest, GenerateScheduleResponse, ScheduleQuery, ScheduleResponse,
};

use crate::{middleware::error_handling::AppError, ApiState};

/// The doctor and their slots from `?date=` (default today) onwards.
#[axum::debug_handler]
pub async fn get_schedule(
    State(state): State<Arc<ApiState>>,
    Path(doctor_id): Path<i64>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let from = query.from_date(Local::now().date_naive())?;

    let doctor = state.clinic.get_doctor(doctor_id).await?;
    let slots = state.clinic.get_schedule_for_doctor(doctor_id, from).await?;

    Ok(Json(ScheduleResponse { doctor, slots }))
}

#[axum::debug_handler]
pub async fn generate_schedule(
    State(state): State<Arc<ApiState>>,
    Path(doctor_id): Path<i64>,
    Json(payload): Json<GenerateScheduleRequest>,
) -> Result<(StatusCode, Json<GenerateScheduleResponse>), AppError> {
    let slots = state
        .clinic
        .generate_and_persist_schedule(doctor_id, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(GenerateScheduleResponse { slots })))
}
