use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/specializations",
            get(handlers::specializations::list_specializations)
                .post(handlers::specializations::create_specialization),
        )
        .route(
            "/api/specializations/:id",
            delete(handlers::specializations::delete_specialization),
        )
        .route(
            "/api/specializations/:id/doctors",
            get(handlers::doctors::list_specialization_doctors),
        )
        .route(
            "/api/specializations/:id/ratings",
            post(handlers::doctors::recompute_specialization_ratings),
        )
}
