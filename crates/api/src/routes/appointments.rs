use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/appointments",
            post(handlers::appointments::create_appointment),
        )
        .route(
            "/api/appointments/:id",
            get(handlers::appointments::get_appointment)
                .patch(handlers::appointments::rate_appointment)
                .delete(handlers::appointments::cancel_appointment),
        )
        .route(
            "/api/patients/:id/appointments",
            get(handlers::appointments::list_patient_appointments),
        )
}
