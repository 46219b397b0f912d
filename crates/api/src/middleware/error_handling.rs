//! # Error Handling Middleware
//!
//! Maps `BookingError` kinds to HTTP status codes and a uniform JSON body:
//!
//! ```json
//! { "status": "failure", "message": "Slot is busy: doctor=5 date=2030-01-10 time=09:00:00" }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use clinicbook_core::errors::BookingError;
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// Handlers return `Result<_, AppError>` and use `?` on any
/// `BookingResult`.
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::SlotBusy(_) => StatusCode::CONFLICT,
            BookingError::InvalidRange(_)
            | BookingError::InvalidDuration(_)
            | BookingError::InvalidRating(_)
            | BookingError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            BookingError::BookingFailed(_)
            | BookingError::CancelFailed(_)
            | BookingError::PersistFailed(_)
            | BookingError::Timeout(_) => StatusCode::SERVICE_UNAVAILABLE,
            BookingError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = ?self.0, "Request failed");
        }

        let body = Json(json!({
            "status": "failure",
            "message": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}
