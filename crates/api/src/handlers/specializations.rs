use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use clinicbook_core::models::doctor::{CreateSpecializationRequest, Specialization};

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn list_specializations(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Specialization>>, AppError> {
    Ok(Json(state.clinic.list_specializations().await?))
}

#[axum::debug_handler]
pub async fn create_specialization(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateSpecializationRequest>,
) -> Result<(StatusCode, Json<Specialization>), AppError> {
    let specialization = state.clinic.create_specialization(&payload).await?;

    Ok((StatusCode::CREATED, Json(specialization)))
}

/// Removes the specialization and every doctor practising it.
#[axum::debug_handler]
pub async fn delete_specialization(
    State(state): State<Arc<ApiState>>,
    Path(specialization_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.clinic.delete_specialization(specialization_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
