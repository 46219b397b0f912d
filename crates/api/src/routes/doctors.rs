use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/doctors", post(handlers::doctors::create_doctor))
        .route(
            "/api/doctors/:id",
            get(handlers::doctors::get_doctor).delete(handlers::doctors::delete_doctor),
        )
        .route(
            "/api/doctors/:id/appointments",
            get(handlers::doctors::list_doctor_appointments),
        )
        .route(
            "/api/doctors/:id/schedule",
            get(handlers::schedule::get_schedule).post(handlers::schedule::generate_schedule),
        )
}
